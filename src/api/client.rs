//! HTTP client for the carteiras REST API
//!
//! One thin wrapper around reqwest with a configurable base URL so tests can
//! point it at a mock server. Endpoints mirror the backend routes under
//! `/api/v1`.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::MIN_SUGGEST_LEN;
use crate::portfolio::types::{
    Holding, NewHolding, NewPortfolio, Portfolio, PriceQuote, RealtimeQuote, StockSuggestion,
};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {endpoint}")]
    Status {
        endpoint: String,
        status: StatusCode,
    },
    #[error("invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("portfolio service is no longer running")]
    ServiceStopped,
}

/// Client for the portfolio backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client against the given base URL (e.g. `http://localhost:8000/`)
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/v1/portfolios/` — portfolio summaries, no holdings
    pub async fn list_portfolios(&self) -> Result<Vec<Portfolio>, ApiError> {
        self.get_json("api/v1/portfolios/").await
    }

    /// `GET /api/v1/portfolios/{id}` — full detail with holdings
    pub async fn portfolio_detail(&self, id: i64) -> Result<Portfolio, ApiError> {
        self.get_json(&format!("api/v1/portfolios/{id}")).await
    }

    /// `POST /api/v1/portfolios/` — create a carteira
    pub async fn create_portfolio(&self, new: &NewPortfolio) -> Result<Portfolio, ApiError> {
        self.post_json("api/v1/portfolios/", new).await
    }

    /// `POST /api/v1/portfolios/assets/` — add a holding to a carteira
    pub async fn add_asset(&self, new: &NewHolding) -> Result<Holding, ApiError> {
        self.post_json("api/v1/portfolios/assets/", new).await
    }

    /// `GET /api/v1/stocks/{symbol}/realtime` — current market price
    pub async fn realtime_quote(&self, symbol: &str) -> Result<PriceQuote, ApiError> {
        let raw: RealtimeQuote = self
            .get_json(&format!("api/v1/stocks/{symbol}/realtime"))
            .await?;
        Ok(PriceQuote {
            symbol: raw.symbol.unwrap_or_else(|| symbol.to_uppercase()),
            price: raw.price,
        })
    }

    /// `GET /api/v1/stocks/suggest/{query}` — symbol autocomplete
    ///
    /// Queries below [`MIN_SUGGEST_LEN`] characters are not sent at all and
    /// resolve to an empty list, matching the autocomplete contract.
    pub async fn suggest(&self, query: &str) -> Result<Vec<StockSuggestion>, ApiError> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGEST_LEN {
            debug!(query, "suggest query below minimum length, skipping request");
            return Ok(Vec::new());
        }
        self.get_json(&format!("api/v1/stocks/suggest/{query}"))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.base_url.join(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        Self::check_status(path, &response)?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.base_url.join(path)?;
        debug!(%url, "POST");
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::check_status(path, &response)?;
        Ok(response.json().await?)
    }

    fn check_status(endpoint: &str, response: &reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
            })
        }
    }
}
