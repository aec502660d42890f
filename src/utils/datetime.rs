use chrono::{Datelike, Timelike};

/// Formats a date as `DD-MM-YYYY`.
///
/// ```
/// use chrono::NaiveDate;
/// use carebook::utils::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(format_date(&date), "05-03-2024");
/// ```
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{:02}-{:02}-{}", date.day(), date.month(), date.year())
}

/// Formats a time of day as 24-hour `HH:MM`.
pub fn format_time<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
