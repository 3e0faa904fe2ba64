use chrono::{DateTime, Utc};

/// Values above this are treated as epoch milliseconds rather than seconds
const MILLISECONDS_THRESHOLD: f64 = 1e10;

const NOT_AVAILABLE: &str = "N/A";

/// Convert an epoch timestamp (seconds, or milliseconds when large) to a UTC datetime
pub fn epoch_to_datetime(timestamp: f64) -> Option<DateTime<Utc>> {
    if !timestamp.is_finite() {
        return None;
    }
    let millis = if timestamp > MILLISECONDS_THRESHOLD { timestamp } else { timestamp * 1000.0 };
    DateTime::from_timestamp_millis(millis.round() as i64)
}

fn known(timestamp: Option<f64>) -> Option<DateTime<Utc>> {
    timestamp.filter(|t| *t != 0.0).and_then(epoch_to_datetime)
}

/// Date shown next to a conversation: "2024-01-15", or "N/A" when unknown
pub fn format_display_date(timestamp: Option<f64>) -> String {
    known(timestamp).map_or_else(|| NOT_AVAILABLE.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

/// Full date and time: "2024-01-15 10:30:00", or "N/A" when unknown
pub fn format_full_timestamp(timestamp: Option<f64>) -> String {
    known(timestamp)
        .map_or_else(|| NOT_AVAILABLE.to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Calendar month bucket ("2024-01") for timeline statistics
pub fn month_key(timestamp: Option<f64>) -> Option<String> {
    known(timestamp).map(|dt| dt.format("%Y-%m").to_string())
}
