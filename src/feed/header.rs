use super::FeedError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

// e.g. "15 Oct 2025"
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}) ([A-Za-z]{3}) (\d{4})$").expect("date pattern is valid")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Extracts the publication date from the first feed line.
///
/// Everything from the first `#` onwards is a free-form comment (the CNB
/// feed puts the fixing serial number there). The remaining token must be
/// exactly `<D> <Mon> <YYYY>` and name a real calendar day.
pub fn parse_header_date(first_line: &str) -> Result<NaiveDate, FeedError> {
    let token = first_line.split('#').next().unwrap_or_default().trim();
    let invalid = || FeedError::InvalidDateFormat(token.to_string());

    let caps = DATE_PATTERN.captures(token).ok_or_else(invalid)?;
    let day: u32 = caps[1].parse().map_err(|_| invalid())?;
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(&caps[2]))
        .ok_or_else(invalid)? as u32
        + 1;
    let year: i32 = caps[3].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
