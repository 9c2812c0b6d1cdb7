//! Scalar value formatting for document display.

use chrono::NaiveDateTime;
use serde_json::Value;

/// Placeholder shown for missing/empty values.
pub const PLACEHOLDER: &str = "Not set";

/// Format a scalar attribute value for display.
///
/// - null or empty string -> placeholder
/// - booleans -> "Yes"/"No"
/// - ISO-8601 timestamp strings -> "DD/MM/YYYY HH:MM"
/// - everything else stringified as-is
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::String(s) if s.is_empty() => PLACEHOLDER.to_string(),
        Value::String(s) => format_timestamp(s).unwrap_or_else(|| s.clone()),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Format an optional string the same way `format_value` treats strings.
pub fn format_opt_str(value: Option<&str>) -> String {
    match value {
        None => PLACEHOLDER.to_string(),
        Some("") => PLACEHOLDER.to_string(),
        Some(s) => format_timestamp(s).unwrap_or_else(|| s.to_string()),
    }
}

/// Reformat a `YYYY-MM-DDTHH:MM:SS[.ffffff]Z` timestamp into the locale
/// day/month/year display. Returns None for anything not timestamp-shaped.
pub fn format_timestamp(value: &str) -> Option<String> {
    let trimmed = value.strip_suffix('Z')?;
    let parsed = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(parsed.format("%d/%m/%Y %H:%M").to_string())
}
