//! Silsila backend API client.
//!
//! All product, order, theme, series, category, and dashboard data lives in
//! the backend service; this module is the thin typed wrapper the rest of
//! the application reads it through.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; base URL comes from configuration
//! - An `Authorization: Bearer` header is attached when the caller's
//!   session token is available
//! - Anonymous catalog reads are cached in-memory via `moka` (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use silsila_web::backend::BackendClient;
//!
//! let backend = BackendClient::new(&config);
//!
//! // Anonymous catalog read (cached)
//! let products = backend.list_products(&ProductFilter::default()).await?;
//!
//! // Authenticated read (never cached)
//! let orders = backend.my_orders(&token).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::BackendClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}
