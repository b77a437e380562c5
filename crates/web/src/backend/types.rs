//! Typed request/response payloads for the Silsila backend API.
//!
//! These mirror the backend's JSON wire format. Every read the site does -
//! catalog, orders, dashboards - comes back as one of these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use silsila_core::{CategoryId, OrderId, OrderStatus, PaymentStatus, Price, ProductId, SeriesId, ThemeId};

/// A page of results from a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    /// Total number of pages for this result set.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }
}

/// A sellable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
    pub series_id: Option<SeriesId>,
    pub theme_id: Option<ThemeId>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub trending: bool,
}

const fn default_true() -> bool {
    true
}

/// A product category (e.g., leggings, hoodies).
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// A product series (a drop or collection line).
#[derive(Debug, Clone, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub name: String,
    pub slug: String,
}

/// A visual theme grouping products for the lookbook.
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

/// One line of an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
}

/// A placed order as the backend reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number (e.g., "SIL-10234").
    pub number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: Price,
}

/// Order submission payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address_line: String,
    pub city: String,
    pub country: String,
    pub items: Vec<NewOrderItem>,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Acknowledgement returned when an order is placed.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub number: String,
}

/// Login submission payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Credentials issued by the backend on successful login.
///
/// The token is opaque to this front-end; the role is only ever compared
/// against `"admin"` by the access guard.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub name: String,
}

/// The signed-in customer's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardMetrics {
    pub total_orders: u64,
    pub total_revenue: Price,
    pub total_customers: u64,
    pub total_products: u64,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
}

/// Aggregated sales analytics for the admin console.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub revenue_by_month: Vec<MonthlyRevenue>,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    #[serde(default)]
    pub orders_by_status: Vec<StatusCount>,
}

/// Revenue bucketed by calendar month.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyRevenue {
    /// Month label (e.g., "2026-08").
    pub month: String,
    pub revenue: Price,
}

/// A best-selling product.
#[derive(Debug, Clone, Deserialize)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub units_sold: u64,
}

/// Order count for one status.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: u64,
}

/// Payload for creating or updating a product from the admin console.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub series_id: Option<SeriesId>,
    pub theme_id: Option<ThemeId>,
    pub sizes: Vec<String>,
    pub image_url: Option<String>,
    pub trending: bool,
}

/// Catalog query parameters for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub series: Option<String>,
    pub theme: Option<String>,
    pub search: Option<String>,
    pub page: u32,
}

impl ProductFilter {
    /// Canonical query-string form; doubles as the cache key for listings.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        let page = self.page.max(1);
        pairs.push(format!("page={page}"));
        if let Some(category) = &self.category {
            pairs.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(series) = &self.series {
            pairs.push(format!("series={}", urlencoding::encode(series)));
        }
        if let Some(theme) = &self.theme {
            pairs.push(format!("theme={}", urlencoding::encode(theme)));
        }
        if let Some(search) = &self.search {
            pairs.push(format!("q={}", urlencoding::encode(search)));
        }
        pairs.join("&")
    }
}
