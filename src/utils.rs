//! Small formatting helpers shared by the views and the logging code.
//!
//! - Date parsing and the "Today" / long-form date label
//! - String capitalization and pluralized counts
//! - Truncation of long strings for log fields
//! - Terminal link rendering

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Capitalize the first character of a string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(capitalize("tech"), "Tech");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest char boundary and
/// suffixed with `"…(+N bytes)"`.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// `"1 article"` / `"N articles"`.
pub fn article_count_label(count: usize) -> String {
    if count == 1 {
        "1 article".to_string()
    } else {
        format!("{count} articles")
    }
}

/// The local calendar day right now.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Extract the calendar date from an API date string.
///
/// Accepts a plain `YYYY-MM-DD`, an RFC 3339 timestamp (converted to the
/// local calendar day), or a naive `YYYY-MM-DDTHH:MM:SS` timestamp. Anything
/// else yields `None`.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Human-readable label for a summary date.
///
/// # Arguments
///
/// * `date` - Date string as returned by the API
/// * `today` - The local calendar day to compare against
///
/// # Returns
///
/// `"Today"` when `date` falls on `today`, otherwise the long en-US form
/// such as `"Monday, January 1"`. Unparseable input comes back as is.
///
/// # Examples
///
/// ```ignore
/// let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// assert_eq!(format_date_label("2024-01-02", today), "Today");
/// assert_eq!(format_date_label("2024-01-01", today), "Monday, January 1");
/// ```
pub fn format_date_label(date: &str, today: NaiveDate) -> String {
    match parse_calendar_date(date) {
        Some(day) if day == today => "Today".to_string(),
        Some(day) => day.format("%A, %B %-d").to_string(),
        None => date.to_string(),
    }
}

/// Render an external link: the title, an arrow icon and the URL.
///
/// # Arguments
///
/// * `title` - Link text
/// * `url` - Target URL, also printed after the arrow
/// * `hyperlinks` - Wrap the title in an OSC-8 escape so terminals that
///   support it open the URL on click
///
/// # Examples
///
/// ```ignore
/// assert_eq!(render_link("A", "http://a", false), "A ↗ http://a");
/// ```
pub fn render_link(title: &str, url: &str, hyperlinks: bool) -> String {
    if hyperlinks {
        format!("\x1b]8;;{url}\x1b\\{title}\x1b]8;;\x1b\\ ↗ {url}")
    } else {
        format!("{title} ↗ {url}")
    }
}
