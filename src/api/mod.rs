//! REST API boundary
//!
//! The backend owns portfolios and holdings; this module only reads them
//! back and posts the two write operations.

mod client;

pub use client::{ApiClient, ApiError};
