//! Account route handlers (`/user-detail`).
//!
//! The access guard has already established that a session token is present
//! on these paths; the handlers still treat a missing or rejected token as
//! unauthorized rather than assuming it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::HeaderMap};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session::{TOKEN_COOKIE_NAME, cookie_value};
use crate::state::AppState;

/// An order row in the customer's history.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub number: String,
    pub placed_at: String,
    pub status: &'static str,
    pub total: String,
}

/// Account page template: profile plus order history.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub orders: Vec<OrderRowView>,
}

/// Display the signed-in customer's profile and order history.
#[instrument(skip(state, headers))]
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<AccountTemplate> {
    let token = cookie_value(&headers, TOKEN_COOKIE_NAME)
        .ok_or_else(|| AppError::Unauthorized("no session token".to_string()))?;

    let profile = state.backend().profile(&token).await?;
    let orders = state.backend().my_orders(&token).await?;

    Ok(AccountTemplate {
        name: profile.name,
        email: profile.email,
        phone: profile.phone.unwrap_or_default(),
        orders: orders
            .iter()
            .map(|o| OrderRowView {
                number: o.number.clone(),
                placed_at: o.placed_at.format("%B %e, %Y").to_string(),
                status: o.status.label(),
                total: o.total.display(),
            })
            .collect(),
    })
}
