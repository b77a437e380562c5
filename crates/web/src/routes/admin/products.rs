//! Admin product management handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use silsila_core::{CategoryId, CurrencyCode, Price, ProductId, SeriesId, ThemeId};
use tracing::instrument;

use crate::backend::{Category, Product, ProductInput, Series, Theme};
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

use super::admin_token;

/// One product row in the admin product table.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub in_stock: bool,
    pub trending: bool,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: product.price.display(),
            in_stock: product.in_stock,
            trending: product.trending,
        }
    }
}

/// Pagination query for the product table.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub page: Option<u32>,
}

/// Admin products page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct AdminProductsTemplate {
    pub products: Vec<ProductRowView>,
    pub current_page: u32,
    pub total_pages: u32,
}

/// A selectable option in the product form dropdowns.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

/// Create/edit product form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub sizes: String,
    pub image_url: String,
    pub trending: bool,
    pub categories: Vec<SelectOption>,
    pub series: Vec<SelectOption>,
    pub themes: Vec<SelectOption>,
}

/// Display the product management table.
#[instrument(skip(state, headers))]
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ProductsQuery>,
) -> Result<AdminProductsTemplate> {
    let token = admin_token(&headers)?;
    let page = state
        .backend()
        .admin_products(&token, query.page.unwrap_or(1))
        .await?;

    Ok(AdminProductsTemplate {
        products: page.items.iter().map(ProductRowView::from).collect(),
        current_page: page.page,
        total_pages: page.total_pages(),
    })
}

/// Display the empty product creation form.
#[instrument(skip(state, headers))]
pub async fn new_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ProductFormTemplate> {
    admin_token(&headers)?;
    let (categories, series, themes) = taxonomy_options(&state, None, None, None).await?;

    Ok(ProductFormTemplate {
        title: "New product",
        action: "/admin/products".to_owned(),
        name: String::new(),
        description: String::new(),
        price: String::new(),
        sizes: String::new(),
        image_url: String::new(),
        trending: false,
        categories,
        series,
        themes,
    })
}

/// Display the edit form pre-filled with an existing product.
#[instrument(skip(state, headers))]
pub async fn edit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<ProductFormTemplate> {
    admin_token(&headers)?;
    let product = state.backend().get_product(ProductId::new(id)).await?;
    let (categories, series, themes) = taxonomy_options(
        &state,
        product.category_id,
        product.series_id,
        product.theme_id,
    )
    .await?;

    Ok(ProductFormTemplate {
        title: "Edit product",
        action: format!("/admin/products/{id}"),
        name: product.name,
        description: product.description,
        price: format!("{:.2}", product.price.amount),
        sizes: product.sizes.join(", "),
        image_url: product.image_url.unwrap_or_default(),
        trending: product.trending,
        categories,
        series,
        themes,
    })
}

/// Product form payload.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    /// Select inputs submit an empty string when nothing is chosen.
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub series_id: String,
    #[serde(default)]
    pub theme_id: String,
    /// Comma-separated size labels.
    #[serde(default)]
    pub sizes: String,
    #[serde(default)]
    pub image_url: String,
    /// Checkboxes submit "on" when ticked and nothing otherwise.
    #[serde(default)]
    pub trending: Option<String>,
}

impl ProductForm {
    fn into_input(self) -> Result<ProductInput> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("Product name is required".to_owned()));
        }
        let amount: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid price: {}", self.price)))?;
        if amount.is_sign_negative() {
            return Err(AppError::BadRequest(
                "Price must not be negative".to_owned(),
            ));
        }

        let image_url = self.image_url.trim();
        Ok(ProductInput {
            name,
            description: self.description.trim().to_owned(),
            price: Price::new(amount, CurrencyCode::USD),
            category_id: parse_optional_id(&self.category_id)?.map(CategoryId::new),
            series_id: parse_optional_id(&self.series_id)?.map(SeriesId::new),
            theme_id: parse_optional_id(&self.theme_id)?.map(ThemeId::new),
            sizes: parse_sizes(&self.sizes),
            image_url: if image_url.is_empty() {
                None
            } else {
                Some(image_url.to_owned())
            },
            trending: self.trending.is_some(),
        })
    }
}

/// Create a product and return to the table.
#[instrument(skip(state, headers, form))]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let token = admin_token(&headers)?;
    let input = form.into_input()?;
    state.backend().create_product(&token, &input).await?;
    Ok(Redirect::to("/admin/products"))
}

/// Update an existing product and return to the table.
#[instrument(skip(state, headers, form))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let token = admin_token(&headers)?;
    let input = form.into_input()?;
    state
        .backend()
        .update_product(&token, ProductId::new(id), &input)
        .await?;
    Ok(Redirect::to("/admin/products"))
}

/// Delete a product and return to the table.
#[instrument(skip(state, headers))]
pub async fn delete(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let token = admin_token(&headers)?;
    state
        .backend()
        .delete_product(&token, ProductId::new(id))
        .await?;
    Ok(Redirect::to("/admin/products"))
}

/// Fetch the taxonomy lists and convert them to dropdown options.
async fn taxonomy_options(
    state: &AppState,
    category_id: Option<CategoryId>,
    series_id: Option<SeriesId>,
    theme_id: Option<ThemeId>,
) -> Result<(Vec<SelectOption>, Vec<SelectOption>, Vec<SelectOption>)> {
    let categories = state.backend().list_categories().await?;
    let series = state.backend().list_series().await?;
    let themes = state.backend().list_themes().await?;

    let categories = categories
        .iter()
        .map(|c: &Category| SelectOption {
            id: c.id.as_i64(),
            name: c.name.clone(),
            selected: category_id == Some(c.id),
        })
        .collect();
    let series = series
        .iter()
        .map(|s: &Series| SelectOption {
            id: s.id.as_i64(),
            name: s.name.clone(),
            selected: series_id == Some(s.id),
        })
        .collect();
    let themes = themes
        .iter()
        .map(|t: &Theme| SelectOption {
            id: t.id.as_i64(),
            name: t.name.clone(),
            selected: theme_id == Some(t.id),
        })
        .collect();

    Ok((categories, series, themes))
}

/// An empty select value means "none"; anything else must be a numeric ID.
fn parse_optional_id(raw: &str) -> Result<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid ID: {raw}")))
}

fn parse_sizes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> ProductForm {
        ProductForm {
            name: "Flex Tee".to_owned(),
            description: "Breathable cotton".to_owned(),
            price: "29.99".to_owned(),
            category_id: "2".to_owned(),
            series_id: String::new(),
            theme_id: String::new(),
            sizes: "S, M, L".to_owned(),
            image_url: String::new(),
            trending: Some("on".to_owned()),
        }
    }

    #[test]
    fn test_form_into_input() {
        let input = base_form().into_input().expect("valid form");
        assert_eq!(input.name, "Flex Tee");
        assert_eq!(input.price.display(), "$29.99");
        assert_eq!(input.category_id, Some(CategoryId::new(2)));
        assert_eq!(input.series_id, None);
        assert_eq!(input.sizes, vec!["S", "M", "L"]);
        assert!(input.trending);
        assert!(input.image_url.is_none());
    }

    #[test]
    fn test_form_rejects_bad_price() {
        let mut form = base_form();
        form.price = "free".to_owned();
        assert!(form.into_input().is_err());

        let mut form = base_form();
        form.price = "-5.00".to_owned();
        assert!(form.into_input().is_err());
    }

    #[test]
    fn test_form_rejects_empty_name() {
        let mut form = base_form();
        form.name = "   ".to_owned();
        assert!(form.into_input().is_err());
    }

    #[test]
    fn test_parse_sizes_skips_blanks() {
        assert_eq!(parse_sizes("S,,M , "), vec!["S", "M"]);
    }
}
