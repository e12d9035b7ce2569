use super::ui;
use crate::core::convert::{from_home, to_home};
use crate::core::{FeedResponse, RatesProvider};
use anyhow::{Result, bail};

/// Direction of a conversion against the home currency (CZK).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    FromCzk,
    ToCzk,
}

/// Converts `amount` between CZK and `code` using a parsed fixing.
pub fn convert(data: &FeedResponse, amount: f64, code: &str, direction: Direction) -> Result<f64> {
    if data.is_empty() {
        bail!("The CNB feed contained no usable rates");
    }
    let Some(record) = data.find(code) else {
        bail!("Currency {code} not found in fixing dated {}", data.date);
    };
    Ok(match direction {
        Direction::FromCzk => from_home(amount, record),
        Direction::ToCzk => to_home(amount, record),
    })
}

pub async fn run(
    provider: &dyn RatesProvider,
    amount: f64,
    code: &str,
    direction: Direction,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching CNB daily rates...");
    let result = provider.fetch_daily().await;
    pb.finish_and_clear();
    let data = result?;

    let converted = convert(&data, amount, code, direction)?;
    let code = code.to_uppercase();
    let (from, to) = match direction {
        Direction::FromCzk => ("CZK", code.as_str()),
        Direction::ToCzk => (code.as_str(), "CZK"),
    };
    println!(
        "{amount:.2} {} = {}  {}",
        ui::style_text(from, ui::StyleType::TotalLabel),
        ui::style_text(&format!("{converted:.2} {to}"), ui::StyleType::TotalValue),
        ui::style_text(&format!("(fixing {})", data.date), ui::StyleType::Subtle),
    );
    Ok(())
}
