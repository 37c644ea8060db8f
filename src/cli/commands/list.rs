use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::portfolio::cancel::CancelToken;
use crate::portfolio::display::{portfolio_grid, DisplayOptions};
use crate::portfolio::loader::{LoadError, PortfolioLoader};
use crate::portfolio::prices::{fetch_quotes, held_symbols};
use crate::portfolio::reconciler::reconcile;
use crate::portfolio::types::DashboardState;

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Skip the price refresh and show purchase-price valuations only
    #[arg(long)]
    pub no_prices: bool,
}

pub struct ListCommand {
    args: ListArgs,
}

impl ListCommand {
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        let client = Arc::new(ApiClient::new(&settings.api_url)?);
        let loader = PortfolioLoader::with_policy(
            client.clone(),
            CancelToken::new(),
            settings.retry.clone(),
        );

        let portfolios = match loader.load().await {
            Ok(portfolios) => portfolios,
            Err(e @ LoadError::RetriesExhausted { .. }) => {
                eprintln!(
                    "{}",
                    display.error(
                        "Não foi possível carregar as carteiras. Por favor, tente novamente mais tarde."
                    )
                );
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        let mut state = DashboardState {
            portfolios,
            last_refreshed: None,
            load_error: None,
        };

        // Same sequence as the dashboard views: portfolios first, then one
        // immediate price pass
        if !self.args.no_prices {
            let symbols = held_symbols(&state.portfolios);
            if !symbols.is_empty() {
                let quotes = fetch_quotes(&client, &symbols).await;
                state.portfolios = state
                    .portfolios
                    .iter()
                    .map(|p| reconcile(p, &quotes))
                    .collect();
                state.last_refreshed = Some(Utc::now());
            }
        }

        println!("{}", portfolio_grid(&state, &display));
        Ok(())
    }
}
