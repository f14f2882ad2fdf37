use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bikeflow_core::{Error, Frame};
use tracing::info;

/// Writes the frame as `GeoJSON` to `output`, or to stdout.
///
/// # Errors
///
/// Returns an error if the collection cannot be built or written.
pub fn write_geojson(frame: &Frame, output: Option<&Path>) -> Result<(), Error> {
    let collection = frame.to_geojson()?;

    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &collection)?;
            writer.flush()?;
            info!(
                "Wrote {} stations ({}) to {}",
                collection.features.len(),
                frame.label,
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer(&mut writer, &collection)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
