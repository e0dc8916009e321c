use chrono::{DateTime, Utc};

pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else if ms < 3_600_000 {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    } else if ms < 86_400_000 {
        let hours = ms / 3_600_000;
        let mins = (ms % 3_600_000) / 60_000;
        format!("{}h {}m", hours, mins)
    } else {
        let days = ms / 86_400_000;
        let hours = (ms % 86_400_000) / 3_600_000;
        format!("{}d {}h", days, hours)
    }
}

/// Coarse age of `at` relative to `now`, e.g. "just now" or "3m 12s ago".
pub fn format_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let ms = now.signed_duration_since(at).num_milliseconds();
    if ms < 1000 {
        // clock skew between client and backend can put timestamps in the future
        "just now".to_string()
    } else {
        format!("{} ago", format_duration(ms as u64))
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
