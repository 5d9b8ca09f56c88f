//! Display formatting for sheet cells.

use chrono::{NaiveDateTime, NaiveTime};

/// `15/03/2024, 09:30 AM`
pub const DATETIME_FORMAT: &str = "%d/%m/%Y, %I:%M %p";
/// `09:30 AM`
pub const TIME_FORMAT: &str = "%I:%M %p";

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Reminder cell text. A sent reminder wins over a scheduled one.
pub fn reminder_text(
    last_sent: Option<NaiveDateTime>,
    scheduled: Option<NaiveDateTime>,
) -> Option<String> {
    match (last_sent, scheduled) {
        (Some(sent), _) => Some(format!("Last Sent: {}", format_datetime(sent))),
        (None, Some(at)) => Some(format!("Scheduled: {}", format_datetime(at))),
        (None, None) => None,
    }
}

/// Mobile number if set, otherwise the landline.
pub fn contact_number(mobile: Option<&str>, phone: Option<&str>) -> Option<String> {
    non_empty(mobile).or_else(|| non_empty(phone)).map(String::from)
}

/// `None` for a missing or empty value. Whitespace counts as a value.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
