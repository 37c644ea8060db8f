//! Portfolio loading with bounded retry
//!
//! The list fetch is the gate: it retries up to a fixed cap with a flat
//! delay, and only a successful list proceeds to the per-portfolio detail
//! fetches. Detail fetches run in parallel and fail soft: one broken
//! carteira keeps its summary fields instead of aborting the batch.

use futures::future::join_all;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::RetryPolicy;
use crate::portfolio::cancel::CancelToken;
use crate::portfolio::types::Portfolio;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not load portfolios after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: ApiError,
    },
    #[error("load cancelled")]
    Cancelled,
}

/// Loads the full portfolio read model from the API
pub struct PortfolioLoader {
    client: Arc<ApiClient>,
    policy: RetryPolicy,
    cancel: CancelToken,
}

impl PortfolioLoader {
    pub fn new(client: Arc<ApiClient>, cancel: CancelToken) -> Self {
        Self::with_policy(client, cancel, RetryPolicy::default())
    }

    pub fn with_policy(client: Arc<ApiClient>, cancel: CancelToken, policy: RetryPolicy) -> Self {
        Self {
            client,
            policy,
            cancel,
        }
    }

    /// Load all carteiras: retried list fetch, then parallel detail fetches
    ///
    /// Each call starts the retry sequence from attempt 0, which is what a
    /// manual "try again" relies on.
    pub async fn load(&self) -> Result<Vec<Portfolio>, LoadError> {
        let summaries = self.list_with_retry().await?;
        if self.cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }

        let portfolios = join_all(
            summaries
                .into_iter()
                .map(|summary| self.detail_or_summary(summary)),
        )
        .await;

        if self.cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        info!(count = portfolios.len(), "portfolios loaded");
        Ok(portfolios)
    }

    async fn list_with_retry(&self) -> Result<Vec<Portfolio>, LoadError> {
        let mut attempt: u32 = 0;
        loop {
            if self.cancel.is_cancelled() {
                return Err(LoadError::Cancelled);
            }
            match self.client.list_portfolios().await {
                Ok(summaries) => {
                    debug!(count = summaries.len(), attempt, "portfolio list fetched");
                    return Ok(summaries);
                }
                Err(e) if attempt >= self.policy.max_retries => {
                    return Err(LoadError::RetriesExhausted {
                        attempts: attempt + 1,
                        source: e,
                    });
                }
                Err(e) => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.policy.max_retries,
                        error = %e,
                        "portfolio list fetch failed, retrying"
                    );
                    sleep(self.policy.delay).await;
                }
            }
        }
    }

    /// Fetch full detail for one carteira, keeping the summary on failure
    async fn detail_or_summary(&self, summary: Portfolio) -> Portfolio {
        match self.client.portfolio_detail(summary.id).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(
                    portfolio_id = summary.id,
                    error = %e,
                    "detail fetch failed, keeping summary fields"
                );
                summary
            }
        }
    }
}
