//! Version command for displaying carteira version information

use anyhow::Result;
use clap::Args;

use crate::config::Settings;
use crate::portfolio::display::DisplayOptions;

#[derive(Args, Clone)]
pub struct VersionArgs {}

pub struct VersionCommand {
    _args: VersionArgs,
}

impl VersionCommand {
    pub fn new(args: VersionArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        const VERSION: &str = env!("CARGO_PKG_VERSION");
        const PKG_NAME: &str = env!("CARGO_PKG_NAME");
        const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

        println!("{} v{}", display.title(PKG_NAME), display.accent(VERSION));
        if !PKG_DESCRIPTION.is_empty() {
            println!("{}", PKG_DESCRIPTION);
        }

        println!();
        println!("  API: {}", display.dim(&settings.api_url));
        println!(
            "  Profile: {}",
            if cfg!(debug_assertions) { "debug" } else { "release" }
        );

        Ok(())
    }
}
