use anyhow::Result;
use clap::Args;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::portfolio::display::{format_brl, DisplayOptions};

#[derive(Args, Clone)]
pub struct QuoteArgs {
    /// Asset symbol (e.g. PETR4)
    pub symbol: String,
}

pub struct QuoteCommand {
    args: QuoteArgs,
}

impl QuoteCommand {
    pub fn new(args: QuoteArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        let client = ApiClient::new(&settings.api_url)?;

        let quote = client.realtime_quote(&self.args.symbol).await?;
        println!(
            "{} {}",
            display.title(&format!("{}:", quote.symbol)),
            format_brl(quote.price)
        );
        Ok(())
    }
}
