use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::portfolio::display::{holdings_table, DisplayOptions};
use crate::portfolio::prices::fetch_quotes;
use crate::portfolio::reconciler::reconcile;

#[derive(Args, Clone)]
pub struct ShowArgs {
    /// Carteira ID
    pub id: i64,
}

pub struct ShowCommand {
    args: ShowArgs,
}

impl ShowCommand {
    pub fn new(args: ShowArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        let client = Arc::new(ApiClient::new(&settings.api_url)?);

        let portfolio = client.portfolio_detail(self.args.id).await?;

        let symbols = crate::portfolio::prices::held_symbols(std::slice::from_ref(&portfolio));
        let reconciled = if symbols.is_empty() {
            portfolio
        } else {
            let quotes = fetch_quotes(&client, &symbols).await;
            reconcile(&portfolio, &quotes)
        };

        println!("{}", holdings_table(&reconciled, &display));
        Ok(())
    }
}
