use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DMY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());

/// Canonicalize a raw field value before it is bound as a query parameter.
///
/// Absent or blank input becomes NULL; a `d/m/yyyy` date becomes ISO
/// `yyyy-mm-dd`; everything else passes through trimmed. Total over its
/// input, never fails.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = DMY_RE.captures(trimmed) {
        // Captures are 1-2 and 4 digit strings, so the int parses cannot fail.
        let day: u32 = caps[1].parse().unwrap();
        let month: u32 = caps[2].parse().unwrap();
        let year: i32 = caps[3].parse().unwrap();
        // Invalid calendar dates (e.g. 31/02) fall through unchanged.
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    Some(trimmed.to_string())
}
