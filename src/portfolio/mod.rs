//! Portfolio read model and the polling/reconciliation engine
//!
//! Data flow: [`loader`] pulls the carteiras from the API, [`service`]
//! periodically enriches them through [`prices`] + [`reconciler`], and the
//! CLI views render whatever state was last published.

pub mod cancel;
pub mod display;
pub mod loader;
pub mod prices;
pub mod reconciler;
pub mod service;
pub mod types;

pub use cancel::CancelToken;
pub use loader::{LoadError, PortfolioLoader};
pub use service::{start_portfolio_service, PortfolioServiceHandle};
pub use types::{DashboardState, Holding, Portfolio, PriceQuote};
