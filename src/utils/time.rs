use chrono::{NaiveDate, Utc};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's UTC date as `YYYY-MM-DD`
pub fn today_iso() -> String {
    Utc::now().date_naive().format(ISO_DATE_FORMAT).to_string()
}

/// Strict `YYYY-MM-DD`: chrono alone also accepts unpadded months and days
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .ok()
        .filter(|date| date.format(ISO_DATE_FORMAT).to_string() == value)
}
