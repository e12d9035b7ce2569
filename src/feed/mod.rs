//! Parser for the CNB daily exchange rate text feed.
//!
//! The feed looks like:
//!
//! ```text
//! 15 Oct 2025 #200
//! Country|Currency|Amount|Code|Rate
//! Australia|dollar|1|AUD|13.757
//! ```
//!
//! A broken date or column header means the format changed and the whole
//! feed is discarded. A broken data row only loses that row.

pub mod columns;
pub mod header;
pub mod row;

use crate::core::FeedResponse;
use columns::ColumnIndexes;
use header::parse_header_date;
use row::decode_row;
use thiserror::Error;
use tracing::{debug, error, trace};

/// Structural defects that invalidate an entire feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("Invalid date format in CNB data: {0}")]
    InvalidDateFormat(String),

    #[error("Missing required headers in CNB data: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),
}

/// Splits on `\n` or `\r\n` and drops empty lines.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parses the feed, surfacing structural errors to the caller.
///
/// A feed with fewer than three lines is not an error; it yields the empty
/// response.
pub fn try_parse_daily_text(text: &str) -> Result<FeedResponse, FeedError> {
    let lines = split_lines(text);
    if lines.len() < 3 {
        debug!("Feed has only {} non-empty lines, nothing to parse", lines.len());
        return Ok(FeedResponse::empty());
    }

    let date = parse_header_date(lines[0])?;
    let idx = ColumnIndexes::resolve(lines[1])?;

    let rates = lines[2..]
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('|').map(str::trim).collect();
            let record = decode_row(&parts, &idx);
            if record.is_none() {
                trace!("Skipping malformed row: {line}");
            }
            record
        })
        .collect();

    Ok(FeedResponse {
        date: date.format("%Y-%m-%d").to_string(),
        rates,
    })
}

/// Parses the feed, degrading any structural error to the empty response.
pub fn parse_daily_text(text: &str) -> FeedResponse {
    try_parse_daily_text(text).unwrap_or_else(|e| {
        error!("Error parsing CNB data: {e}");
        FeedResponse::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "15 Oct 2025 # Daily rates\nCountry|Currency|Amount|Code|Rate\nUnited States|Dollar|1|USD|23.500\nEurozone|Euro|1|EUR|25.800\nJapan|Yen|100|JPY|15.800\n";

    #[test]
    fn test_split_lines_handles_crlf_and_blanks() {
        assert_eq!(split_lines("a\r\nb\n\n\r\nc\n"), vec!["a", "b", "c"]);
        assert_eq!(split_lines(" x \n"), vec![" x "]);
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n\r\n").is_empty());
    }

    #[test]
    fn test_parses_full_daily_text() {
        let json = parse_daily_text(SAMPLE);
        assert_eq!(json.date, "2025-10-15");
        assert_eq!(json.rates.len(), 3);
        let codes: Vec<&str> = json.rates.iter().map(|r| r.currency_code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "EUR", "JPY"]);

        let jpy = json.find("JPY").unwrap();
        assert_eq!(jpy.amount, 100.0);
        assert_eq!(jpy.rate, 15.8);
    }

    #[test]
    fn test_crlf_feed_matches_lf_feed() {
        let crlf = SAMPLE.replace('\n', "\r\n");
        assert_eq!(parse_daily_text(&crlf), parse_daily_text(SAMPLE));
    }

    #[test]
    fn test_short_feeds_are_empty_not_errors() {
        for text in [
            "",
            "15 Oct 2025 #200",
            "15 Oct 2025 #200\nCountry|Currency|Amount|Code|Rate\n\n\n",
        ] {
            assert_eq!(try_parse_daily_text(text), Ok(FeedResponse::empty()));
        }
    }

    #[test]
    fn test_bad_date_discards_whole_feed() {
        let text = SAMPLE.replace("15 Oct 2025", "BadDate 2025");
        assert_eq!(
            try_parse_daily_text(&text),
            Err(FeedError::InvalidDateFormat("BadDate 2025".to_string()))
        );
        assert_eq!(parse_daily_text(&text), FeedResponse::empty());
    }

    #[test]
    fn test_missing_rate_column_discards_whole_feed() {
        let text = SAMPLE.replace("|Rate", "|Price");
        assert_eq!(
            try_parse_daily_text(&text),
            Err(FeedError::MissingHeaders(vec!["rate".to_string()]))
        );
        let json = parse_daily_text(&text);
        assert!(json.date.is_empty());
        assert!(json.rates.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped_individually() {
        let text = "15 Oct 2025 #200\n\
                    Country|Currency|Amount|Code|Rate\n\
                    United States|Dollar|1|USD|23.500\n\
                    Nowhere|Zero|0|ZRO|1.0\n\
                    Nowhere|Negative|1|NEG|-1\n\
                    Nowhere|Nameless|1||25.0\n\
                    \u{20}\u{20}\n\
                    Japan|Yen|100|JPY|15.800\n";
        let json = try_parse_daily_text(text).unwrap();
        assert_eq!(json.date, "2025-10-15");
        let codes: Vec<&str> = json.rates.iter().map(|r| r.currency_code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "JPY"]);
    }

    #[test]
    fn test_column_order_does_not_change_records() {
        let reordered = "15 Oct 2025\n\
                         Rate|Code|Amount|Currency|Country\n\
                         23.500|USD|1|Dollar|United States\n\
                         25.800|EUR|1|Euro|Eurozone\n\
                         15.800|JPY|100|Yen|Japan\n";
        assert_eq!(parse_daily_text(reordered), parse_daily_text(SAMPLE));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        assert_eq!(parse_daily_text(SAMPLE), parse_daily_text(SAMPLE));
    }

    #[test]
    fn test_decimal_comma_feed() {
        let text = "15 Oct 2025 #200\nCountry|Currency|Amount|Code|Rate\nEMU|euro|1|EUR|24,325\n";
        let json = parse_daily_text(text);
        assert_eq!(json.rates.len(), 1);
        assert!((json.rates[0].rate - 24.325).abs() < 1e-12);
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(parse_daily_text(SAMPLE)).unwrap();
        assert_eq!(value["date"], "2025-10-15");
        assert_eq!(value["rates"][2]["currencyCode"], "JPY");
        assert_eq!(value["rates"][2]["amount"], 100.0);
        assert_eq!(value["rates"][0]["country"], "United States");
    }
}
