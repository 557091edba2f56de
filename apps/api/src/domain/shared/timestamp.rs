use chrono::{DateTime, SecondsFormat, Utc};

/// Formats an instant the way browsers print `Date.toISOString()`,
/// e.g. `2025-01-15T14:30:00.000Z`.
pub fn to_iso_string(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable form used in notification bodies.
pub fn to_display_string(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y at %H:%M UTC").to_string()
}
