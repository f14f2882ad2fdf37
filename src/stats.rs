use std::fmt::Write;

use bikeflow_core::Frame;
use itertools::Itertools;

/// Fixed-width table of the bound stations, busiest first.
pub fn render_table(frame: &Frame, top: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} | {} stations | {} trips | max traffic {}",
        frame.label,
        frame.elements.len(),
        frame.snapshot.trips_considered(),
        frame.snapshot.max_total_traffic()
    );
    let _ = writeln!(
        out,
        "{:<16} {:>8} {:>10} {:>8} {:>7} {:>5}",
        "station", "arrivals", "departures", "total", "radius", "flow"
    );

    let rows = frame
        .elements
        .iter()
        .sorted_by(|a, b| {
            b.total_traffic
                .cmp(&a.total_traffic)
                .then_with(|| a.key.cmp(&b.key))
        })
        .take(top.unwrap_or(usize::MAX));

    for element in rows {
        let _ = writeln!(
            out,
            "{:<16} {:>8} {:>10} {:>8} {:>7.2} {:>5.1}",
            element.key.as_str(),
            element.arrivals,
            element.departures,
            element.total_traffic,
            element.r,
            element.flow_ratio
        );
    }
    out
}
