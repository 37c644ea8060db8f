//! Live dashboard view
//!
//! Owns a portfolio service instance for its lifetime: the service keeps
//! valuations fresh on its own interval, this view just re-renders whatever
//! it publishes. `r` asks the service for an immediate refresh (or a full
//! reload when the last load failed), `q` or Ctrl+C is the teardown hook;
//! teardown flips the cancellation token once and the view drains out
//! without publishing anything further.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::portfolio::cancel::CancelToken;
use crate::portfolio::display::{dashboard, DisplayOptions};
use crate::portfolio::service::start_portfolio_service;

#[derive(Args, Clone)]
pub struct WatchArgs {
    /// Price refresh interval in seconds (default: 300)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

/// What one line of operator input asks the view to do
#[derive(Debug, PartialEq, Eq)]
enum InputAction {
    RefreshPrices,
    Reload,
    Quit,
    Ignore,
}

/// Map an input line to an action; `r` retries the load when the last one
/// failed and refreshes prices otherwise
fn parse_input(line: &str, has_load_error: bool) -> InputAction {
    match line.trim() {
        l if l.eq_ignore_ascii_case("r") => {
            if has_load_error {
                InputAction::Reload
            } else {
                InputAction::RefreshPrices
            }
        }
        l if l.eq_ignore_ascii_case("q") => InputAction::Quit,
        _ => InputAction::Ignore,
    }
}

pub struct WatchCommand {
    args: WatchArgs,
}

impl WatchCommand {
    pub fn new(args: WatchArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, settings: &Settings, display: DisplayOptions) -> Result<()> {
        let client = Arc::new(ApiClient::new(&settings.api_url)?);
        let cancel = CancelToken::new();
        let interval = self
            .args
            .interval
            .map(Duration::from_secs)
            .unwrap_or(settings.refresh_interval);

        let (handle, mut state_rx) = start_portfolio_service(
            client,
            settings.retry.clone(),
            interval,
            cancel.clone(),
        );

        {
            let cancel = cancel.clone();
            ctrlc::set_handler(move || cancel.cancel())?;
        }

        println!("Carregando carteiras... (Ctrl+C para sair)");

        let mut input = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;

        loop {
            tokio::select! {
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = state_rx.borrow_and_update().clone();
                    // Clear screen before redrawing; a plain terminal gets
                    // the frames appended instead
                    if display.color {
                        print!("\x1B[2J\x1B[1;1H");
                    }
                    println!("{}", dashboard(&state, &display));
                    println!(
                        "Atualização automática a cada {}s — r atualiza agora, q ou Ctrl+C sai",
                        interval.as_secs()
                    );
                }

                line = input.next_line(), if stdin_open => {
                    match line {
                        Ok(Some(line)) => {
                            let has_load_error = state_rx.borrow().load_error.is_some();
                            match parse_input(&line, has_load_error) {
                                InputAction::RefreshPrices => {
                                    if let Err(e) = handle.refresh_prices().await {
                                        warn!(error = %e, "manual price refresh failed");
                                    }
                                }
                                InputAction::Reload => {
                                    if let Err(e) = handle.reload().await {
                                        warn!(error = %e, "manual reload failed");
                                    }
                                }
                                InputAction::Quit => {
                                    cancel.cancel();
                                    break;
                                }
                                InputAction::Ignore => {}
                            }
                        }
                        // Stdin closed (e.g. piped); keep rendering on the timer
                        _ => stdin_open = false,
                    }
                }

                _ = tokio::time::sleep(Duration::from_millis(200)) => {
                    if cancel.is_cancelled() {
                        break;
                    }
                }
            }
        }

        drop(handle);
        Ok(())
    }
}
