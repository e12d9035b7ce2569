use super::FeedError;

/// Positions of the required columns within a `|`-separated feed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndexes {
    pub country: usize,
    pub currency: usize,
    pub amount: usize,
    pub code: usize,
    pub rate: usize,
}

impl ColumnIndexes {
    /// Resolves column positions from the header line. Names are matched
    /// case-insensitively after trimming; order is free.
    pub fn resolve(header_line: &str) -> Result<Self, FeedError> {
        let names: Vec<String> = header_line
            .split('|')
            .map(|s| s.trim().to_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        let found = [
            ("country", find("country")),
            ("currency", find("currency")),
            ("amount", find("amount")),
            ("code", find("code")),
            ("rate", find("rate")),
        ];

        match found {
            [
                (_, Some(country)),
                (_, Some(currency)),
                (_, Some(amount)),
                (_, Some(code)),
                (_, Some(rate)),
            ] => Ok(ColumnIndexes {
                country,
                currency,
                amount,
                code,
                rate,
            }),
            _ => Err(FeedError::MissingHeaders(
                found
                    .iter()
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            )),
        }
    }
}
