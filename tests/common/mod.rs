//! Shared fixtures for the wiremock-based integration tests
#![allow(dead_code)]

use serde_json::{json, Value};

pub fn summary(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "created_at": "2024-05-01T10:00:00"
    })
}

pub fn detail(id: i64, name: &str, assets: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "carteira de teste",
        "created_at": "2024-05-01T10:00:00",
        "assets": assets,
        "transactions": []
    })
}

pub fn asset(id: i64, portfolio_id: i64, symbol: &str, quantity: &str, purchase_price: &str) -> Value {
    json!({
        "id": id,
        "portfolio_id": portfolio_id,
        "symbol": symbol,
        "quantity": quantity,
        "purchase_price": purchase_price,
        "purchase_date": "2024-01-15",
        "notes": null
    })
}
