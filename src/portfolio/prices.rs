//! Batch price fetching
//!
//! Fan-out/fan-in: every symbol's request is issued before any is awaited,
//! and the cycle proceeds only once all of them have settled. A failed fetch
//! degrades that symbol to its fallback valuation instead of failing the
//! cycle.

use futures::future::join_all;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::portfolio::types::{Portfolio, PriceQuote};

/// Distinct set of symbols held across all carteiras
pub fn held_symbols(portfolios: &[Portfolio]) -> BTreeSet<String> {
    portfolios
        .iter()
        .flat_map(|p| p.assets.iter().map(|h| h.symbol.clone()))
        .collect()
}

/// Fetch current quotes for a batch of symbols in parallel
///
/// Symbols whose fetch fails are logged and simply absent from the returned
/// map; callers must treat a missing quote as non-fatal.
pub async fn fetch_quotes(
    client: &ApiClient,
    symbols: &BTreeSet<String>,
) -> HashMap<String, PriceQuote> {
    let requests = symbols.iter().map(|symbol| async move {
        match client.realtime_quote(symbol).await {
            Ok(quote) => Some((symbol.clone(), quote)),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "price fetch failed, keeping fallback valuation");
                None
            }
        }
    });

    let quotes: HashMap<String, PriceQuote> =
        join_all(requests).await.into_iter().flatten().collect();
    debug!(
        requested = symbols.len(),
        received = quotes.len(),
        "price refresh batch settled"
    );
    quotes
}
