//! Portfolio type definitions with strong typing
//!
//! The wire format follows the backend: `quantity` and `purchase_price`
//! travel as decimal strings, which is what `rust_decimal`'s serde default
//! produces and accepts. Valuation fields are derived client-side and never
//! posted back.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One carteira as returned by the API
///
/// The list endpoint returns only the summary fields; `assets` deserializes
/// to an empty vec in that case and is filled in by the detail fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub assets: Vec<Holding>,
}

impl Portfolio {
    /// Sum of the holdings' displayed values (quote-based where available,
    /// purchase-price fallback otherwise)
    pub fn total_value(&self) -> Decimal {
        self.assets.iter().map(Holding::market_value).sum()
    }

    pub fn has_holdings(&self) -> bool {
        !self.assets.is_empty()
    }
}

/// One asset position inside a carteira
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: i64,
    pub portfolio_id: i64,
    pub symbol: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    /// Latest quote merged in by reconciliation; never authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

impl Holding {
    /// What was paid for the position
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.purchase_price
    }

    /// Displayed value: reconciled total where available, cost basis until
    /// the first quote for this symbol arrives
    pub fn market_value(&self) -> Decimal {
        self.total_value.unwrap_or_else(|| self.cost_basis())
    }
}

/// Point-in-time price for a symbol; transient, merged into holdings per cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: Decimal,
}

/// Wire shape of `GET /api/v1/stocks/{symbol}/realtime`
///
/// `price` arrives as a JSON number; rust_decimal's default deserializer
/// accepts both numbers and strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeQuote {
    #[serde(default)]
    pub symbol: Option<String>,
    pub price: Decimal,
}

/// One row of `GET /api/v1/stocks/suggest/{query}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSuggestion {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub subsector: Option<String>,
}

/// Body of `POST /api/v1/portfolios/`
#[derive(Debug, Clone, Serialize)]
pub struct NewPortfolio {
    pub name: String,
    pub description: String,
}

/// Body of `POST /api/v1/portfolios/assets/`
#[derive(Debug, Clone, Serialize)]
pub struct NewHolding {
    pub symbol: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub notes: String,
    pub portfolio_id: i64,
}

impl NewHolding {
    /// Canonicalize for submission: symbols are stored uppercase
    pub fn canonical(mut self) -> Self {
        self.symbol = self.symbol.trim().to_uppercase();
        self
    }
}

/// State published by the portfolio service after every load or refresh
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub portfolios: Vec<Portfolio>,
    pub last_refreshed: Option<DateTime<Utc>>,
    /// Terminal load failure, cleared by a successful reload
    pub load_error: Option<String>,
}

impl DashboardState {
    pub fn has_holdings(&self) -> bool {
        self.portfolios.iter().any(Portfolio::has_holdings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(symbol: &str, quantity: Decimal, purchase_price: Decimal) -> Holding {
        Holding {
            id: 1,
            portfolio_id: 1,
            symbol: symbol.to_string(),
            quantity,
            purchase_price,
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            notes: None,
            current_price: None,
            total_value: None,
            percentage: None,
        }
    }

    #[test]
    fn test_market_value_falls_back_to_cost_basis() {
        let h = holding("PETR4", dec!(100), dec!(30.00));
        assert_eq!(h.market_value(), dec!(3000.00));
    }

    #[test]
    fn test_market_value_prefers_reconciled_total() {
        let mut h = holding("PETR4", dec!(100), dec!(30.00));
        h.total_value = Some(dec!(3500));
        assert_eq!(h.market_value(), dec!(3500));
    }

    #[test]
    fn test_new_holding_canonical_uppercases_symbol() {
        let body = NewHolding {
            symbol: " petr4 ".to_string(),
            quantity: dec!(10),
            purchase_price: dec!(30),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            notes: String::new(),
            portfolio_id: 1,
        }
        .canonical();
        assert_eq!(body.symbol, "PETR4");
    }

    #[test]
    fn test_portfolio_summary_deserializes_without_assets() {
        let json = r#"{
            "id": 1,
            "name": "Dividendos",
            "description": null,
            "created_at": "2024-05-01T10:00:00"
        }"#;
        let p: Portfolio = serde_json::from_str(json).unwrap();
        assert_eq!(p.name, "Dividendos");
        assert!(p.assets.is_empty());
    }

    #[test]
    fn test_holding_decimal_string_round_trip() {
        let json = r#"{
            "id": 7,
            "portfolio_id": 1,
            "symbol": "PETR4",
            "quantity": "100",
            "purchase_price": "30.00",
            "purchase_date": "2024-01-15"
        }"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.quantity, dec!(100));
        assert_eq!(h.purchase_price, dec!(30.00));

        // Posting serializes decimals back to strings
        let body = serde_json::to_value(NewHolding {
            symbol: h.symbol.clone(),
            quantity: h.quantity,
            purchase_price: h.purchase_price,
            purchase_date: h.purchase_date,
            notes: String::new(),
            portfolio_id: 1,
        })
        .unwrap();
        assert_eq!(body["quantity"], "100");
        assert_eq!(body["purchase_price"], "30.00");
    }

    #[test]
    fn test_realtime_quote_accepts_json_number() {
        let raw: RealtimeQuote = serde_json::from_str(r#"{"price": 35.0}"#).unwrap();
        assert_eq!(raw.price, dec!(35.0));
        assert!(raw.symbol.is_none());
    }
}
