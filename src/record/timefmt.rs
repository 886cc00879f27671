use chrono::{DateTime, Utc};

/// ISO-8601 with a numeric zone offset, e.g. `2024-01-15T10:30:00+0000`.
/// Fixed at compile time and shared read-only by every invocation.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

const MESSAGE_DATE_FORMAT: &str = "%Y%m%d";
const MESSAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(RECORD_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_str(timestamp, RECORD_TIMESTAMP_FORMAT).ok()
}

/// Alternate renderings of the record timestamp carried in the message fields:
/// a compact date and a space-separated date-time with comma-delimited millis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTimestamps {
    pub date: String,
    pub time: String,
}

/// Reformats an already-formatted record timestamp. Returns `None` when the
/// string does not parse back; callers degrade to the empty pair.
pub fn message_timestamps(timestamp: &str) -> Option<MessageTimestamps> {
    let parsed = parse_timestamp(timestamp)?;
    Some(MessageTimestamps {
        date: parsed.format(MESSAGE_DATE_FORMAT).to_string(),
        time: parsed.format(MESSAGE_TIME_FORMAT).to_string(),
    })
}
