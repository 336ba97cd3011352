//! Export file names
//!
//! Names follow `sj-token-{name}-{timestamp}.{png,json}` for artifacts tied to
//! a display name and `sj-config-{timestamp}.png` for the bare QR image.

use chrono::{DateTime, SecondsFormat, Utc};

/// Substitute used when a name has no usable characters
pub const ANONYMOUS: &str = "anon";

/// Length of the timestamp segment (`YYYY-MM-DDTHH-MM-SS`)
pub const TIMESTAMP_LEN: usize = 19;

/// Reduce a display name to `[A-Za-z0-9_-]`, joining words with hyphens
pub fn file_name_segment(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return ANONYMOUS.to_string();
    }

    let normalized: String = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if normalized.is_empty() {
        ANONYMOUS.to_string()
    } else {
        normalized
    }
}

/// ISO-8601 instant with `:` and `.` replaced by `-`, cut after the seconds
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
        .chars()
        .take(TIMESTAMP_LEN)
        .collect()
}

/// `sj-token-{name}-{timestamp}.png`
pub fn labeled_png_name(name: &str, at: DateTime<Utc>) -> String {
    token_name(name, at, "png")
}

/// `sj-token-{name}-{timestamp}.json`
pub fn json_name(name: &str, at: DateTime<Utc>) -> String {
    token_name(name, at, "json")
}

/// `sj-config-{timestamp}.png`
pub fn plain_png_name(at: DateTime<Utc>) -> String {
    format!("sj-config-{}.png", file_timestamp(at))
}

fn token_name(name: &str, at: DateTime<Utc>, extension: &str) -> String {
    format!(
        "sj-token-{}-{}.{extension}",
        file_name_segment(name),
        file_timestamp(at)
    )
}
