use chrono::SecondsFormat;

/// Document identifiers are UUID strings generated by the store.
pub type DocId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Format a timestamp as fixed-width RFC 3339 with microsecond precision.
///
/// The fixed width makes lexical order equal chronological order, which the
/// document store relies on when sorting by a timestamp field.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time formatted with [`format_timestamp`].
pub fn now_timestamp() -> String {
    format_timestamp(chrono::Utc::now())
}
