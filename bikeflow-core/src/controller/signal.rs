use serde::{Deserialize, Serialize};

use crate::TimeFilter;

/// External events the controller subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    /// Slider moved; the full pipeline reruns
    FilterChanged { filter: TimeFilter },
    /// Pan, zoom or resize of the map; only positions are re-derived
    ViewTransformChanged,
}

impl Signal {
    /// Filter change from a raw slider value, malformed values meaning
    /// "no filter"
    pub fn filter_from_raw(value: Option<i64>) -> Self {
        Self::FilterChanged {
            filter: TimeFilter::from_optional_signal(value),
        }
    }
}

/// Collapses a queue of pending signals into the one that still matters.
///
/// The latest filter supersedes earlier ones, and a full rebind already
/// re-derives positions, so any view change is subsumed by a filter change.
pub fn coalesce<I>(signals: I) -> Option<Signal>
where
    I: IntoIterator<Item = Signal>,
{
    signals
        .into_iter()
        .fold(None, |pending, signal| match (pending, signal) {
            (_, Signal::FilterChanged { .. }) => Some(signal),
            (Some(filter @ Signal::FilterChanged { .. }), Signal::ViewTransformChanged) => {
                Some(filter)
            }
            (_, Signal::ViewTransformChanged) => Some(signal),
        })
}
