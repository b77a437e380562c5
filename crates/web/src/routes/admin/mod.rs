//! Admin console route handlers (`/admin`).
//!
//! Every page here fetches through the backend's admin surface with the
//! caller's bearer token. The access guard has already checked the role
//! claim; the backend re-checks the token on every call, so a forged role
//! cookie buys nothing but a 401.

pub mod analytics;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::http::HeaderMap;

use crate::error::AppError;
use crate::models::session::{TOKEN_COOKIE_NAME, cookie_value};

/// Pull the session token off the request for an admin backend call.
pub(super) fn admin_token(headers: &HeaderMap) -> Result<String, AppError> {
    cookie_value(headers, TOKEN_COOKIE_NAME)
        .ok_or_else(|| AppError::Unauthorized("no session token".to_string()))
}
