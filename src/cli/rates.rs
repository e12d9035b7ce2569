use super::ui;
use crate::core::{FeedResponse, RatesProvider};
use anyhow::Result;
use comfy_table::Cell;

impl FeedResponse {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Country"),
            ui::header_cell("Currency"),
            ui::header_cell("Code"),
            ui::header_cell("Amount"),
            ui::header_cell("Rate (CZK)"),
        ]);

        for record in &self.rates {
            table.add_row(vec![
                Cell::new(&record.country),
                Cell::new(&record.currency),
                Cell::new(&record.currency_code),
                ui::number_cell(format!("{}", record.amount)),
                ui::number_cell(format!("{:.3}", record.rate)),
            ]);
        }

        let mut output = format!(
            "CNB exchange rate fixing: {}\n\n",
            ui::style_text(&self.date, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{}",
            ui::style_text(
                &format!("{} currencies", self.rates.len()),
                ui::StyleType::Subtle
            )
        ));
        output
    }
}

pub async fn run(provider: &dyn RatesProvider, as_json: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching CNB daily rates...");
    let result = provider.fetch_daily().await;
    pb.finish_and_clear();
    let data = result?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else if data.is_empty() {
        println!(
            "{}",
            ui::style_text("The CNB feed could not be parsed", ui::StyleType::Subtle)
        );
    } else {
        println!("{}", data.display_as_table());
    }
    Ok(())
}
