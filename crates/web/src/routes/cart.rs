//! Cart route handlers.
//!
//! The cart rides in a client cookie ([`crate::models::Cart`]); every
//! mutation parses it from the request, applies the change, and sets the
//! updated cookie on a redirect back to the cart page. Lines are re-priced
//! against the backend on each render so the cookie never stores prices.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use silsila_core::{CurrencyCode, Price, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Cart;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub image_url: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/index.html")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

/// Cart mutation form payload.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Price the cart's lines against the backend catalog.
///
/// A line whose product has vanished from the catalog is skipped rather
/// than failing the whole page.
pub(super) async fn price_cart(
    state: &AppState,
    cart: &Cart,
) -> Result<(Vec<CartLineView>, Price)> {
    let mut lines = Vec::with_capacity(cart.lines.len());
    let mut subtotal = Decimal::ZERO;
    let mut currency = CurrencyCode::default();

    for line in &cart.lines {
        let product = match state.backend().get_product(line.product_id).await {
            Ok(product) => product,
            Err(crate::backend::BackendError::NotFound(_)) => continue,
            Err(err) => return Err(AppError::from(err)),
        };
        let line_total = product.price.amount * Decimal::from(line.quantity);
        subtotal += line_total;
        currency = product.price.currency_code;
        lines.push(CartLineView {
            product_id: product.id.as_i64(),
            name: product.name.clone(),
            quantity: line.quantity,
            unit_price: product.price.display(),
            line_total: Price::new(line_total, product.price.currency_code).display(),
            image_url: product.image_url.clone(),
        });
    }

    Ok((lines, Price::new(subtotal, currency)))
}

/// Display the cart page.
#[instrument(skip(state, headers))]
pub async fn show(State(state): State<AppState>, headers: HeaderMap) -> Result<CartTemplate> {
    let cart = Cart::from_headers(&headers);
    let item_count = cart.item_count();
    let (lines, subtotal) = price_cart(&state, &cart).await?;

    Ok(CartTemplate {
        lines,
        subtotal: subtotal.display(),
        item_count,
    })
}

/// Apply a cart mutation and redirect back to the cart page with the
/// updated cookie.
fn cart_response(state: &AppState, cart: &Cart) -> Result<impl IntoResponse + use<>> {
    let cookie = cart
        .to_cookie(state.secure_cookies())
        .map_err(|e| AppError::Internal(format!("cart cookie: {e}")))?;
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to("/cart"),
    ))
}

/// Add a product to the cart.
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Result<impl IntoResponse> {
    // Reject unknown products up front so the cookie only ever holds
    // purchasable lines.
    let product = state
        .backend()
        .get_product(ProductId::new(form.product_id))
        .await?;

    let mut cart = Cart::from_headers(&headers);
    cart.add(product.id, form.quantity.max(1));
    cart_response(&state, &cart)
}

/// Update a line's quantity (zero removes it).
#[instrument(skip(state, headers))]
pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Result<impl IntoResponse> {
    let mut cart = Cart::from_headers(&headers);
    cart.set_quantity(ProductId::new(form.product_id), form.quantity);
    cart_response(&state, &cart)
}

/// Remove a line from the cart.
#[instrument(skip(state, headers))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Result<impl IntoResponse> {
    let mut cart = Cart::from_headers(&headers);
    cart.remove(ProductId::new(form.product_id));
    cart_response(&state, &cart)
}
