pub mod cnb_provider;
pub mod util;

pub use cnb_provider::{CnbProvider, GatewayError};
