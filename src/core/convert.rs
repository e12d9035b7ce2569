//! Currency conversion against a published fixing

use super::rates::RateRecord;

/// Converts `czk` into the currency quoted by `record`.
pub fn from_home(czk: f64, record: &RateRecord) -> f64 {
    czk * (record.amount / record.rate)
}

/// Converts `foreign` units of the quoted currency into CZK.
pub fn to_home(foreign: f64, record: &RateRecord) -> f64 {
    foreign * (record.rate / record.amount)
}
