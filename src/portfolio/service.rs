//! Portfolio service actor with channel-based communication
//!
//! One actor owns the in-memory portfolio list and is the only writer:
//! commands and the refresh timer are serialized by its select loop, so a
//! manual refresh and a timer tick can never interleave their publications.
//! Consumers watch the published [`DashboardState`] and talk back through a
//! [`PortfolioServiceHandle`].

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::RetryPolicy;
use crate::portfolio::cancel::CancelToken;
use crate::portfolio::loader::{LoadError, PortfolioLoader};
use crate::portfolio::prices::{fetch_quotes, held_symbols};
use crate::portfolio::reconciler::reconcile;
use crate::portfolio::types::{DashboardState, Holding, NewHolding, NewPortfolio, Portfolio};

/// Portfolio service commands
#[derive(Debug)]
pub enum PortfolioCommand {
    /// Reload the whole read model, restarting the retry sequence from zero
    Reload {
        response: oneshot::Sender<Result<(), LoadError>>,
    },
    /// Run one price refresh cycle now, out of band from the timer
    RefreshPrices {
        response: oneshot::Sender<()>,
    },
    GetState {
        response: oneshot::Sender<DashboardState>,
    },
    CreatePortfolio {
        new: NewPortfolio,
        response: oneshot::Sender<Result<Portfolio, ApiError>>,
    },
    AddAsset {
        new: NewHolding,
        response: oneshot::Sender<Result<Holding, ApiError>>,
    },
}

/// Refresh scheduler state: nothing ticks until the first successful load
/// brings in at least one holding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchedulerState {
    Idle,
    Active,
}

/// Portfolio service actor
pub struct PortfolioService {
    client: Arc<ApiClient>,
    loader: PortfolioLoader,
    cancel: CancelToken,
    refresh_interval: Duration,
    scheduler: SchedulerState,
    state: DashboardState,
    command_rx: mpsc::Receiver<PortfolioCommand>,
    state_tx: watch::Sender<DashboardState>,
}

impl PortfolioService {
    pub fn new(
        client: Arc<ApiClient>,
        policy: RetryPolicy,
        refresh_interval: Duration,
        cancel: CancelToken,
        command_rx: mpsc::Receiver<PortfolioCommand>,
        state_tx: watch::Sender<DashboardState>,
    ) -> Self {
        let loader = PortfolioLoader::with_policy(client.clone(), cancel.clone(), policy);
        Self {
            client,
            loader,
            cancel,
            refresh_interval,
            scheduler: SchedulerState::Idle,
            state: DashboardState::default(),
            command_rx,
            state_tx,
        }
    }

    /// Start the portfolio service actor
    pub async fn run(mut self) -> Result<()> {
        info!(api = %self.client.base_url(), "Starting portfolio service");

        // Initial load, then one immediate price pass so the first published
        // state already carries valuations
        match self.loader.load().await {
            Ok(portfolios) => {
                self.install_portfolios(portfolios);
                self.refresh_prices().await;
            }
            Err(LoadError::Cancelled) => return Ok(()),
            Err(e) => {
                warn!(error = %e, "initial load failed");
                self.state.load_error = Some(e.to_string());
                self.publish();
            }
        }

        let mut ticker = interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval fires immediately; consume it so
        // the automatic cadence starts one full interval from now.
        ticker.tick().await;

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    match command {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => {
                            info!("Command channel closed, stopping portfolio service");
                            break;
                        }
                    }
                }

                _ = ticker.tick(), if self.scheduler == SchedulerState::Active => {
                    debug!("scheduled price refresh");
                    self.refresh_prices().await;
                }
            }

            if self.cancel.is_cancelled() {
                break;
            }
        }

        info!("Portfolio service stopped");
        Ok(())
    }

    async fn handle_command(&mut self, command: PortfolioCommand) {
        match command {
            PortfolioCommand::Reload { response } => {
                let result = self.reload().await;
                let _ = response.send(result);
            }

            PortfolioCommand::RefreshPrices { response } => {
                self.refresh_prices().await;
                let _ = response.send(());
            }

            PortfolioCommand::GetState { response } => {
                let _ = response.send(self.state.clone());
            }

            PortfolioCommand::CreatePortfolio { new, response } => {
                let result = self.client.create_portfolio(&new).await;
                if result.is_ok() {
                    self.reload_after_write().await;
                }
                let _ = response.send(result);
            }

            PortfolioCommand::AddAsset { new, response } => {
                let result = self.client.add_asset(&new.canonical()).await;
                if result.is_ok() {
                    self.reload_after_write().await;
                }
                let _ = response.send(result);
            }
        }
    }

    async fn reload(&mut self) -> Result<(), LoadError> {
        match self.loader.load().await {
            Ok(portfolios) => {
                self.install_portfolios(portfolios);
                self.refresh_prices().await;
                Ok(())
            }
            Err(e) => {
                if !matches!(e, LoadError::Cancelled) {
                    self.state.load_error = Some(e.to_string());
                    self.publish();
                }
                Err(e)
            }
        }
    }

    /// Writes are fire-and-forget followed by a full reload of the read model
    async fn reload_after_write(&mut self) {
        if let Err(e) = self.reload().await {
            warn!(error = %e, "reload after write failed");
        }
    }

    /// Replace the read model wholesale and arm the scheduler if warranted
    fn install_portfolios(&mut self, portfolios: Vec<Portfolio>) {
        self.state.portfolios = portfolios;
        self.state.load_error = None;
        if self.scheduler == SchedulerState::Idle && self.state.has_holdings() {
            info!("holdings present, price refresh scheduler armed");
            self.scheduler = SchedulerState::Active;
        }
        self.publish();
    }

    /// One reconciliation cycle: distinct symbols, parallel quotes, per-
    /// carteira reconcile, publish
    async fn refresh_prices(&mut self) {
        let symbols = held_symbols(&self.state.portfolios);
        if symbols.is_empty() {
            debug!("no holdings, skipping price refresh");
            return;
        }

        let quotes = fetch_quotes(&self.client, &symbols).await;
        if self.cancel.is_cancelled() {
            return;
        }

        self.state.portfolios = self
            .state
            .portfolios
            .iter()
            .map(|p| reconcile(p, &quotes))
            .collect();
        self.state.last_refreshed = Some(Utc::now());
        self.publish();
    }

    /// Publish the current state unless the consumer tore down
    fn publish(&self) {
        if self.cancel.is_cancelled() {
            debug!("cancelled, dropping state publication");
            return;
        }
        let _ = self.state_tx.send(self.state.clone());
    }
}

/// Portfolio service handle for sending commands
#[derive(Clone)]
pub struct PortfolioServiceHandle {
    command_tx: mpsc::Sender<PortfolioCommand>,
}

impl PortfolioServiceHandle {
    pub fn new(command_tx: mpsc::Sender<PortfolioCommand>) -> Self {
        Self { command_tx }
    }

    /// Reload the read model (the manual "try again" action)
    pub async fn reload(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(PortfolioCommand::Reload { response: tx })
            .await?;
        rx.await??;
        Ok(())
    }

    /// Trigger an immediate price refresh without touching the timer
    pub async fn refresh_prices(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(PortfolioCommand::RefreshPrices { response: tx })
            .await?;
        rx.await?;
        Ok(())
    }

    pub async fn get_state(&self) -> Result<DashboardState> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(PortfolioCommand::GetState { response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn create_portfolio(&self, new: NewPortfolio) -> Result<Portfolio, ApiError> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(PortfolioCommand::CreatePortfolio { new, response: tx })
            .await
            .map_err(|_| ApiError::ServiceStopped)?;
        rx.await.map_err(|_| ApiError::ServiceStopped)?
    }

    pub async fn add_asset(&self, new: NewHolding) -> Result<Holding, ApiError> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(PortfolioCommand::AddAsset { new, response: tx })
            .await
            .map_err(|_| ApiError::ServiceStopped)?;
        rx.await.map_err(|_| ApiError::ServiceStopped)?
    }
}

/// Start the portfolio service and return its handle plus the state feed
pub fn start_portfolio_service(
    client: Arc<ApiClient>,
    policy: RetryPolicy,
    refresh_interval: Duration,
    cancel: CancelToken,
) -> (
    PortfolioServiceHandle,
    watch::Receiver<DashboardState>,
) {
    let (command_tx, command_rx) = mpsc::channel(32);
    let (state_tx, state_rx) = watch::channel(DashboardState::default());

    let service = PortfolioService::new(
        client,
        policy,
        refresh_interval,
        cancel,
        command_rx,
        state_tx,
    );

    // Spawn service in background
    tokio::spawn(async move {
        if let Err(e) = service.run().await {
            error!("Portfolio service error: {}", e);
        }
    });

    (PortfolioServiceHandle::new(command_tx), state_rx)
}
