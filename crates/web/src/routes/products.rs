//! Shop route handlers: product listing and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use silsila_core::ProductId;
use tracing::instrument;

use crate::backend::{Product, ProductFilter};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
    pub sizes: Vec<String>,
    pub in_stock: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image_url: product.image_url.clone(),
            sizes: product.sizes.clone(),
            in_stock: product.in_stock,
        }
    }
}

/// Filter option (category/series/theme) for the listing sidebar.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub name: String,
    pub slug: String,
}

/// Shop listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    pub category: Option<String>,
    pub series: Option<String>,
    pub theme: Option<String>,
    pub q: Option<String>,
    pub page: Option<u32>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ShopIndexTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<FilterOption>,
    pub series: Vec<FilterOption>,
    pub search: String,
    pub current_page: u32,
    pub total_pages: u32,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
}

/// Display the shop listing, filtered and paginated.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ShopQuery>,
) -> Result<ShopIndexTemplate> {
    let filter = ProductFilter {
        category: query.category,
        series: query.series,
        theme: query.theme,
        search: query.q.clone(),
        page: query.page.unwrap_or(1),
    };

    let page = state.backend().list_products(&filter).await?;
    let categories = state.backend().list_categories().await?;
    let series = state.backend().list_series().await?;

    Ok(ShopIndexTemplate {
        products: page.items.iter().map(ProductView::from).collect(),
        categories: categories
            .iter()
            .map(|c| FilterOption {
                name: c.name.clone(),
                slug: c.slug.clone(),
            })
            .collect(),
        series: series
            .iter()
            .map(|s| FilterOption {
                name: s.name.clone(),
                slug: s.slug.clone(),
            })
            .collect(),
        search: query.q.unwrap_or_default(),
        current_page: page.page,
        total_pages: page.total_pages(),
    })
}

/// Display a product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ProductShowTemplate> {
    let product = state.backend().get_product(ProductId::new(id)).await?;
    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
    })
}
