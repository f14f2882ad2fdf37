use chrono::NaiveTime;

use super::TimeFilter;

/// Label shown while no filter is active
pub const UNFILTERED_LABEL: &str = "(any time)";

/// `HH:MM AM/PM` for a filter minute, [`UNFILTERED_LABEL`] otherwise.
pub fn time_label(filter: TimeFilter) -> String {
    match filter {
        TimeFilter::Unfiltered => UNFILTERED_LABEL.to_string(),
        TimeFilter::AtMinute(minute) => NaiveTime::from_hms_opt(
            u32::from(minute / 60),
            u32::from(minute % 60),
            0,
        )
        .map_or_else(
            || UNFILTERED_LABEL.to_string(),
            |time| time.format("%I:%M %p").to_string(),
        ),
    }
}
