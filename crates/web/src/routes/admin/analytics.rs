//! Admin sales analytics page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::HeaderMap};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::admin_token;

/// Revenue for one calendar month.
#[derive(Debug, Clone)]
pub struct MonthRow {
    pub month: String,
    pub revenue: String,
}

/// A best-selling product row.
#[derive(Debug, Clone)]
pub struct TopProductRow {
    pub name: String,
    pub units_sold: u64,
}

/// Order count for one status.
#[derive(Debug, Clone)]
pub struct StatusRow {
    pub status: &'static str,
    pub count: u64,
}

/// Analytics page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/analytics.html")]
pub struct AnalyticsTemplate {
    pub revenue_by_month: Vec<MonthRow>,
    pub top_products: Vec<TopProductRow>,
    pub orders_by_status: Vec<StatusRow>,
}

/// Display aggregated sales analytics.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<AnalyticsTemplate> {
    let token = admin_token(&headers)?;
    let summary = state.backend().analytics(&token).await?;

    Ok(AnalyticsTemplate {
        revenue_by_month: summary
            .revenue_by_month
            .iter()
            .map(|m| MonthRow {
                month: m.month.clone(),
                revenue: m.revenue.display(),
            })
            .collect(),
        top_products: summary
            .top_products
            .iter()
            .map(|p| TopProductRow {
                name: p.name.clone(),
                units_sold: p.units_sold,
            })
            .collect(),
        orders_by_status: summary
            .orders_by_status
            .iter()
            .map(|s| StatusRow {
                status: s.status.label(),
                count: s.count,
            })
            .collect(),
    })
}
