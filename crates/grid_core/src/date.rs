use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate};

/// Render pattern matching the original grid's `DD MMM YYYY`.
pub const DEFAULT_PATTERN: &str = "%d %b %Y";
pub const DEFAULT_FALLBACK: &str = "- - -";

/// Formats a raw date value for display, or returns `fallback` unchanged.
///
/// Accepts RFC 3339 date-times (rendered in their own encoded offset, no
/// local-time conversion) and bare `YYYY-MM-DD` dates. Invalid input is a
/// normal case, not an error: anything unparseable, including a pattern
/// that does not fit the parsed value, yields the fallback.
pub fn format_date(raw: Option<&str>, pattern: &str, fallback: &str) -> String {
    let Some(raw) = raw else {
        return fallback.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        if let Some(rendered) = render(format_args!("{}", parsed.format(pattern))) {
            return rendered;
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(rendered) = render(format_args!("{}", parsed.format(pattern))) {
            return rendered;
        }
    }
    fallback.to_string()
}

/// Launch-date display with the grid defaults.
pub fn launch_date_display(raw: Option<&str>) -> String {
    format_date(raw, DEFAULT_PATTERN, DEFAULT_FALLBACK)
}

// chrono's DelayedFormat reports bad pattern/value combinations through
// fmt::Error, which `to_string` would turn into a panic. Writing into the
// buffer by hand keeps that path fallible.
fn render(args: std::fmt::Arguments<'_>) -> Option<String> {
    let mut out = String::new();
    out.write_fmt(args).ok()?;
    Some(out)
}
