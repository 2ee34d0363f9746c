// Response formatting helpers

use chrono::{DateTime, Local, Utc};

/// Two-decimal percent string, e.g. `42.00%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Coverage string; `0%` when the supply is unknown
pub fn coverage(tokens_tracked: u64, total_supply: u64) -> String {
    if total_supply > 0 {
        percent(tokens_tracked as f64 / total_supply as f64 * 100.0)
    } else {
        "0%".to_string()
    }
}

/// Parses a stored `lastSync` value
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Caller guidance attached to the holders response
pub fn sync_note(last_sync: Option<&DateTime<Utc>>) -> String {
    match last_sync {
        Some(ts) => format!(
            "Data last synced at {}. Use POST /sync to update.",
            ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => "No sync has been performed yet. Use POST /sync to populate the database."
            .to_string(),
    }
}
