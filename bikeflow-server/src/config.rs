use std::net::SocketAddr;
use std::path::Path;

use bikeflow_core::WebMercatorView;
use bikeflow_core::loading::DatasetConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    pub datasets: DatasetConfig,
    /// Initial map view
    #[serde(default)]
    pub view: WebMercatorView,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            max_concurrent_requests: 64,
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

impl ServerConfig {
    /// Reads the TOML config. Relative dataset paths resolve against the
    /// directory of the config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.datasets.stations_path,
            &mut self.datasets.trips_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_concurrent_requests == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_concurrent_requests must be positive".to_string(),
            ));
        }
        if self.limits.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "limits.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.view.width <= 0.0 || self.view.height <= 0.0 {
            return Err(ConfigError::Invalid(
                "view.width and view.height must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = ServerConfig::from_toml(
            r#"
            [datasets]
            stations_path = "stations.csv"
            trips_path = "trips.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind, default_bind());
        assert_eq!(config.limits, Limits::default());
        assert_eq!(config.view, WebMercatorView::default());
    }

    #[test]
    fn test_full_config() {
        let config = ServerConfig::from_toml(
            r#"
            bind = "0.0.0.0:8080"

            [datasets]
            stations_path = "/srv/stations.json"
            trips_path = "/srv/trips.csv"

            [view]
            center = [-87.63, 41.88]
            zoom = 12.5
            width = 1024.0
            height = 768.0

            [limits]
            request_timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert!((config.view.zoom - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.limits.request_timeout_secs, 3);
        assert_eq!(config.limits.max_concurrent_requests, 64);
    }

    #[test]
    fn test_relative_paths_follow_config_dir() {
        let mut config = ServerConfig::from_toml(
            r#"
            [datasets]
            stations_path = "data/stations.csv"
            trips_path = "/abs/trips.csv"
            "#,
        )
        .unwrap();
        config.resolve_paths(Path::new("/etc/bikeflow"));

        assert_eq!(
            config.datasets.stations_path,
            PathBuf::from("/etc/bikeflow/data/stations.csv")
        );
        assert_eq!(config.datasets.trips_path, PathBuf::from("/abs/trips.csv"));
    }

    #[test]
    fn test_invalid_limits_are_rejected() {
        let result = ServerConfig::from_toml(
            r#"
            [datasets]
            stations_path = "s.csv"
            trips_path = "t.csv"

            [limits]
            max_concurrent_requests = 0
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_datasets_section() {
        let result = ServerConfig::from_toml("bind = \"127.0.0.1:1\"");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
