//! Cookie-backed shopping cart.
//!
//! The cart lives entirely in a client cookie as percent-encoded JSON; the
//! server holds no cart state. Prices are never stored here - line items
//! carry only product IDs and quantities, and the cart page re-prices them
//! against the backend on every render.

use axum::http::{HeaderMap, HeaderValue, header::InvalidHeaderValue};
use serde::{Deserialize, Serialize};
use silsila_core::ProductId;

use super::session::cookie_value;

/// Cookie holding the serialized cart.
pub const CART_COOKIE_NAME: &str = "silsila_cart";

/// Cart cookie lifetime in seconds (30 days).
const CART_MAX_AGE_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Cap on distinct line items, so the cookie stays well under 4 KiB.
const MAX_LINES: usize = 50;

/// Cap on per-line quantity.
const MAX_QUANTITY: u32 = 99;

/// A single cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Units of the product.
    pub quantity: u32,
}

/// The visitor's cart, as round-tripped through the cart cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Line items, in insertion order.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Parse the cart from the request's cart cookie.
    ///
    /// A missing or unparseable cookie yields an empty cart - a corrupt
    /// cart is recoverable, losing it is not worth a 400.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        cookie_value(headers, CART_COOKIE_NAME)
            .and_then(|raw| urlencoding::decode(&raw).ok().map(|s| s.into_owned()))
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Add units of a product, merging with an existing line if present.
    ///
    /// Quantities clamp at the per-line cap; adding beyond the distinct-line
    /// cap is a no-op.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity).min(MAX_QUANTITY);
            return;
        }
        if self.lines.len() < MAX_LINES {
            self.lines.push(CartLine {
                product_id,
                quantity: quantity.clamp(1, MAX_QUANTITY),
            });
        }
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity.min(MAX_QUANTITY);
        }
    }

    /// Remove a product's line entirely.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialize the cart into a `Set-Cookie` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoded cart is not a valid header value;
    /// percent-encoded JSON always is, so this is effectively infallible.
    pub fn to_cookie(&self, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        let encoded = urlencoding::encode(&json);
        let mut cookie = format!(
            "{CART_COOKIE_NAME}={encoded}; Path=/; HttpOnly; SameSite=Lax; Max-Age={CART_MAX_AGE_SECONDS}"
        );
        if secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }
}
