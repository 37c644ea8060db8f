use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;

use crate::api::ApiClient;
use crate::cli::{parse_date, parse_decimal};
use crate::config::Settings;
use crate::portfolio::display::{format_brl, DisplayOptions};
use crate::portfolio::types::NewHolding;

#[derive(Args, Clone)]
pub struct AddArgs {
    /// Asset symbol (stored uppercase, e.g. PETR4)
    pub symbol: String,

    /// Carteira to add the asset to
    #[arg(long, short = 'p')]
    pub portfolio: i64,

    /// Quantity purchased
    #[arg(long, short = 'q', value_parser = parse_decimal)]
    pub quantity: Decimal,

    /// Purchase price per unit
    #[arg(long, value_parser = parse_decimal)]
    pub price: Decimal,

    /// Purchase date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Free-text notes
    #[arg(long, default_value = "")]
    pub notes: String,
}

pub struct AddCommand {
    args: AddArgs,
}

impl AddCommand {
    pub fn new(args: AddArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        let client = ApiClient::new(&settings.api_url)?;

        let body = NewHolding {
            symbol: self.args.symbol.clone(),
            quantity: self.args.quantity,
            purchase_price: self.args.price,
            purchase_date: self
                .args
                .date
                .unwrap_or_else(|| Local::now().date_naive()),
            notes: self.args.notes.clone(),
            portfolio_id: self.args.portfolio,
        }
        .canonical();

        let created = client.add_asset(&body).await?;

        println!(
            "{} {} x{} a {} (carteira {})",
            display.accent("Ativo adicionado:"),
            created.symbol,
            created.quantity,
            format_brl(created.purchase_price),
            created.portfolio_id
        );
        Ok(())
    }
}
