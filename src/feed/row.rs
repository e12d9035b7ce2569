use super::columns::ColumnIndexes;
use crate::core::RateRecord;

/// Parses a feed number, reading `,` as the decimal separator.
pub fn parse_decimal(token: &str) -> Option<f64> {
    token
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Decodes one data line, already split on `|` into trimmed cells.
///
/// Returns `None` for rows without a currency code or with an amount or
/// rate that is not a positive number. A blank or absent amount means 1.
pub fn decode_row(parts: &[&str], idx: &ColumnIndexes) -> Option<RateRecord> {
    let cell = |i: usize| parts.get(i).copied().unwrap_or_default();

    let amount_str = Some(cell(idx.amount))
        .filter(|s| !s.is_empty())
        .unwrap_or("1");
    let code = cell(idx.code);
    if code.is_empty() {
        return None;
    }

    let amount = parse_decimal(amount_str).filter(|a| *a > 0.0)?;
    let rate = parse_decimal(cell(idx.rate)).filter(|r| *r > 0.0)?;

    Some(RateRecord {
        country: cell(idx.country).to_string(),
        currency: cell(idx.currency).to_string(),
        amount,
        currency_code: code.to_string(),
        rate,
    })
}
