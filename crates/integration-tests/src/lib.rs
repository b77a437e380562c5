//! Integration tests for the Silsila web front-end.
//!
//! # Test Categories
//!
//! - `guard` / `cart` - In-process router tests for cookie-based route
//!   access and cart mutations. These build the real application router
//!   and drive it with `tower`'s `oneshot`, so they need no running
//!   services.
//! - `storefront` / `admin` - End-to-end smoke tests against a running
//!   server and backend API. These are `#[ignore]`d by default; run them
//!   with `cargo test -- --ignored` once both are up.
//!
//! # Running
//!
//! ```bash
//! # In-process tests
//! cargo test -p silsila-integration-tests
//!
//! # End-to-end tests (server + backend required)
//! SILSILA_WEB_URL=http://localhost:3000 cargo test -p silsila-integration-tests -- --ignored
//! ```

use silsila_web::config::{SentryConfig, SilsilaConfig};
use silsila_web::state::AppState;

/// Build the real application router against a dummy backend URL.
///
/// Good for any test that never lets a handler reach the backend: the
/// access guard and the static route table behave exactly as in
/// production.
///
/// # Panics
///
/// Panics if the baked-in test configuration is invalid.
#[must_use]
pub fn test_app() -> axum::Router {
    let config = SilsilaConfig {
        api_base_url: "http://127.0.0.1:9".parse().expect("valid test URL"),
        host: "127.0.0.1".parse().expect("valid test host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        sentry: SentryConfig::default(),
    };
    silsila_web::app(AppState::new(config))
}
