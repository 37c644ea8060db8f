//! Valuation reconciliation
//!
//! Pure recomputation of current value and percentage share for every
//! holding of a carteira given a batch of fresh quotes. The input is never
//! mutated; callers replace their state wholesale with the returned value.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::portfolio::types::{Holding, Portfolio, PriceQuote};

/// Recompute valuations for one carteira
///
/// Effective price per holding: the fresh quote if one arrived this cycle,
/// otherwise the price carried over from an earlier cycle, otherwise the
/// purchase price. Percentages are shares of the carteira total and sum to
/// 100 whenever that total is nonzero; with a zero total every share is 0.
pub fn reconcile(portfolio: &Portfolio, quotes: &HashMap<String, PriceQuote>) -> Portfolio {
    let mut assets: Vec<Holding> = portfolio
        .assets
        .iter()
        .map(|holding| {
            let mut holding = holding.clone();
            if let Some(quote) = quotes.get(&holding.symbol) {
                holding.current_price = Some(quote.price);
            }
            let effective = holding.current_price.unwrap_or(holding.purchase_price);
            holding.total_value = Some(holding.quantity * effective);
            holding
        })
        .collect();

    let total: Decimal = assets.iter().filter_map(|h| h.total_value).sum();
    for holding in &mut assets {
        let value = holding.total_value.unwrap_or(Decimal::ZERO);
        holding.percentage = Some(if total > Decimal::ZERO {
            (value / total) * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        });
    }

    Portfolio {
        assets,
        ..portfolio.clone()
    }
}
