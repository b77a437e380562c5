//! Checkout and order tracking handlers.
//!
//! Checkout turns the cart cookie into a backend order, clears the cookie,
//! and lands the customer on the tracking page for their new order number.
//! Tracking is anonymous: order number plus purchase email.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect},
};
use serde::Deserialize;
use silsila_core::Email;
use tracing::instrument;

use crate::backend::{BackendError, NewOrder, NewOrderItem};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Cart;
use crate::state::AppState;

use super::cart::CartLineView;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/checkout.html")]
pub struct CheckoutTemplate {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub error: Option<String>,
}

/// Checkout form payload.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address_line: String,
    pub city: String,
    pub country: String,
}

/// Display the checkout form with an order summary.
#[instrument(skip(state, headers))]
pub async fn checkout_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<axum::response::Response> {
    let cart = Cart::from_headers(&headers);
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let (lines, subtotal) = super::cart::price_cart(&state, &cart).await?;
    Ok(CheckoutTemplate {
        lines,
        subtotal: subtotal.display(),
        error: None,
    }
    .into_response())
}

/// Place the order and clear the cart cookie.
#[instrument(skip(state, headers, form))]
pub async fn place(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CheckoutForm>,
) -> Result<impl IntoResponse> {
    let mut cart = Cart::from_headers(&headers);
    if cart.is_empty() {
        return Err(AppError::BadRequest("Your cart is empty".to_string()));
    }

    let email = Email::parse(form.email.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid email: {e}")))?;
    if form.customer_name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if form.address_line.trim().is_empty() || form.city.trim().is_empty() {
        return Err(AppError::BadRequest("Shipping address is required".to_string()));
    }

    let order = NewOrder {
        customer_name: form.customer_name.trim().to_string(),
        email: email.as_str().to_string(),
        phone: form.phone.trim().to_string(),
        address_line: form.address_line.trim().to_string(),
        city: form.city.trim().to_string(),
        country: form.country.trim().to_string(),
        items: cart
            .lines
            .iter()
            .map(|l| NewOrderItem {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect(),
    };

    let placed = state.backend().place_order(&order).await?;
    tracing::info!(order_number = %placed.number, "order placed");

    // Clear the cart and land on the tracking page for the new order.
    cart.clear();
    let cookie = cart
        .to_cookie(state.secure_cookies())
        .map_err(|e| AppError::Internal(format!("cart cookie: {e}")))?;
    let target = format!(
        "/track-order?number={}&email={}",
        urlencoding::encode(&placed.number),
        urlencoding::encode(email.as_str())
    );
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to(&target),
    ))
}

/// Order item display data for the tracking page.
#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
}

/// A tracked order, formatted for display.
#[derive(Debug, Clone)]
pub struct TrackedOrderView {
    pub number: String,
    pub status: &'static str,
    pub in_progress: bool,
    pub payment_status: &'static str,
    pub placed_at: String,
    pub total: String,
    pub items: Vec<OrderItemView>,
}

/// Tracking query parameters; both must be present to run a lookup.
#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub number: Option<String>,
    pub email: Option<String>,
}

/// Order tracking page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/track.html")]
pub struct TrackTemplate {
    pub order: Option<TrackedOrderView>,
    pub not_found: bool,
    pub number: String,
    pub email: String,
}

/// Display the tracking page, running a lookup when both fields are given.
#[instrument(skip(state))]
pub async fn track(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> Result<TrackTemplate> {
    let number = query.number.unwrap_or_default();
    let email = query.email.unwrap_or_default();

    if number.is_empty() || email.is_empty() {
        return Ok(TrackTemplate {
            order: None,
            not_found: false,
            number,
            email,
        });
    }

    match state.backend().track_order(&number, &email).await {
        Ok(order) => Ok(TrackTemplate {
            order: Some(TrackedOrderView {
                number: order.number.clone(),
                status: order.status.label(),
                in_progress: order.status.is_open(),
                payment_status: order.payment_status.label(),
                placed_at: order.placed_at.format("%B %e, %Y").to_string(),
                total: order.total.display(),
                items: order
                    .items
                    .iter()
                    .map(|i| OrderItemView {
                        name: i.name.clone(),
                        quantity: i.quantity,
                        unit_price: i.unit_price.display(),
                    })
                    .collect(),
            }),
            not_found: false,
            number,
            email,
        }),
        Err(BackendError::NotFound(_)) => Ok(TrackTemplate {
            order: None,
            not_found: true,
            number,
            email,
        }),
        Err(err) => Err(AppError::from(err)),
    }
}
