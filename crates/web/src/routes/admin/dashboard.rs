//! Admin dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::HeaderMap};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::admin_token;
use super::orders::OrderRowView;

/// Headline metrics formatted for display.
#[derive(Debug, Clone)]
pub struct MetricsView {
    pub orders: String,
    pub revenue: String,
    pub customers: String,
    pub products: String,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub metrics: MetricsView,
    pub recent_orders: Vec<OrderRowView>,
}

/// Display the admin dashboard: headline metrics and recent orders.
#[instrument(skip(state, headers))]
pub async fn show(State(state): State<AppState>, headers: HeaderMap) -> Result<DashboardTemplate> {
    let token = admin_token(&headers)?;
    let metrics = state.backend().dashboard(&token).await?;

    Ok(DashboardTemplate {
        metrics: MetricsView {
            orders: metrics.total_orders.to_string(),
            revenue: metrics.total_revenue.display(),
            customers: metrics.total_customers.to_string(),
            products: metrics.total_products.to_string(),
        },
        recent_orders: metrics
            .recent_orders
            .iter()
            .map(OrderRowView::from)
            .collect(),
    })
}
