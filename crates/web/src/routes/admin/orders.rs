//! Admin order management handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Redirect,
};
use serde::Deserialize;
use silsila_core::{OrderId, OrderStatus};
use tracing::instrument;

use crate::backend::Order;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

use super::admin_token;

/// One order row in the admin order table.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: i64,
    pub number: String,
    pub customer_name: String,
    pub placed_at: String,
    pub status: &'static str,
    pub payment_status: &'static str,
    pub total: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i64(),
            number: order.number.clone(),
            customer_name: order.customer_name.clone(),
            placed_at: order.placed_at.format("%Y-%m-%d %H:%M").to_string(),
            status: order.status.label(),
            payment_status: order.payment_status.label(),
            total: order.total.display(),
        }
    }
}

/// Pagination query for the order table.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub page: Option<u32>,
}

/// Admin orders page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/orders.html")]
pub struct AdminOrdersTemplate {
    pub orders: Vec<OrderRowView>,
    pub statuses: Vec<&'static str>,
    pub current_page: u32,
    pub total_pages: u32,
}

/// Display the order management table.
#[instrument(skip(state, headers))]
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<OrdersQuery>,
) -> Result<AdminOrdersTemplate> {
    let token = admin_token(&headers)?;
    let page = state
        .backend()
        .admin_orders(&token, query.page.unwrap_or(1))
        .await?;

    Ok(AdminOrdersTemplate {
        orders: page.items.iter().map(OrderRowView::from).collect(),
        statuses: OrderStatus::all().iter().map(|s| s.label()).collect(),
        current_page: page.page,
        total_pages: page.total_pages(),
    })
}

/// Status update form payload.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Update an order's fulfillment status and return to the table.
#[instrument(skip(state, headers))]
pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let token = admin_token(&headers)?;
    let status = parse_status(&form.status)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status: {}", form.status)))?;

    state
        .backend()
        .update_order_status(&token, OrderId::new(id), status)
        .await?;

    Ok(Redirect::to("/admin/orders"))
}

/// Map a status label or wire value back to the enum.
fn parse_status(raw: &str) -> Option<OrderStatus> {
    OrderStatus::all()
        .into_iter()
        .find(|s| s.label().eq_ignore_ascii_case(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_accepts_labels() {
        assert_eq!(parse_status("Shipped"), Some(OrderStatus::Shipped));
        assert_eq!(parse_status("shipped"), Some(OrderStatus::Shipped));
        assert_eq!(parse_status("nonsense"), None);
    }
}
