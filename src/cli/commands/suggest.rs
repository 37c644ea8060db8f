use anyhow::Result;
use clap::Args;

use crate::api::ApiClient;
use crate::config::{Settings, MIN_SUGGEST_LEN};
use crate::portfolio::display::{suggestions_table, DisplayOptions};

#[derive(Args, Clone)]
pub struct SuggestArgs {
    /// Start of a symbol, e.g. PET
    pub query: String,
}

pub struct SuggestCommand {
    args: SuggestArgs,
}

impl SuggestCommand {
    pub fn new(args: SuggestArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        if self.args.query.trim().chars().count() < MIN_SUGGEST_LEN {
            println!(
                "{}",
                display.warning(&format!(
                    "Digite pelo menos {MIN_SUGGEST_LEN} caracteres para buscar símbolos"
                ))
            );
            return Ok(());
        }

        let client = ApiClient::new(&settings.api_url)?;
        let suggestions = client.suggest(&self.args.query).await?;
        print!("{}", suggestions_table(&suggestions));
        Ok(())
    }
}
