use anyhow::Result;
use clap::Args;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::portfolio::display::DisplayOptions;
use crate::portfolio::types::NewPortfolio;

#[derive(Args, Clone)]
pub struct CreateArgs {
    /// Carteira name
    pub name: String,

    /// Free-text description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

pub struct CreateCommand {
    args: CreateArgs,
}

impl CreateCommand {
    pub fn new(args: CreateArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        let client = ApiClient::new(&settings.api_url)?;

        let created = client
            .create_portfolio(&NewPortfolio {
                name: self.args.name.clone(),
                description: self.args.description.clone(),
            })
            .await?;

        println!(
            "{} {} (id {})",
            display.accent("Carteira criada:"),
            created.name,
            created.id
        );
        println!("Use 'carteira add --portfolio {}' para adicionar ativos", created.id);
        Ok(())
    }
}
