/// Date formatting for delivery rows and day headers.
use chrono::{Days, NaiveDate};

/// `YYYY-MM-DD`.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses `YYYY-MM-DD`.
pub fn parse_iso(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// `DD/MM/YYYY`, as shown on delivery cards.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Header label for a day group relative to `today`.
///
/// `"Today"`, `"Yesterday"`, otherwise weekday, day and month
/// (e.g. `"Monday 4 March"`).
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.checked_sub_days(Days::new(1)) == Some(date) {
        return "Yesterday".to_string();
    }
    date.format("%A %-d %B").to_string()
}
