use chrono::{DateTime, Utc};

/// Relative age label: "just now", "1 minute ago", "2 hours ago", ...
pub fn ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }

    let (count, unit) = match secs {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 30 * 86_400 => (s / 86_400, "day"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };
    format!("{count} {unit}{} ago", plural(count))
}

/// "" for one, "s" otherwise.
pub fn plural(count: impl Into<i64>) -> &'static str {
    if count.into() == 1 {
        ""
    } else {
        "s"
    }
}
