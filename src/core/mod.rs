//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use rates::{FeedResponse, RateRecord, RatesProvider};
