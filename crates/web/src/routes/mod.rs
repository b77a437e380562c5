//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Shop
//! GET  /shop                    - Product listing (category/series/theme/search filters)
//! GET  /shop/{id}               - Product detail
//!
//! # Marketing pages
//! GET  /about                   - About the brand
//! GET  /faqs                    - Frequently asked questions
//! GET  /lookbook                - Theme lookbook
//! GET  /trending                - Trending products
//!
//! # Cart
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add a product
//! POST /cart/update             - Update a line's quantity
//! POST /cart/remove             - Remove a line
//!
//! # Checkout & tracking
//! GET  /checkout                - Checkout form
//! POST /checkout                - Place the order
//! GET  /track-order             - Order tracking (form + result)
//!
//! # Auth (auth-entry section: guarded away from signed-in visitors)
//! GET  /authentication          - Login page
//! POST /authentication/login    - Login action (sets credential cookies)
//! POST /logout                  - Logout action (clears credential cookies)
//!
//! # Account (user-protected section)
//! GET  /user-detail             - Profile and order history
//!
//! # Admin console (admin-protected section)
//! GET  /admin                   - Dashboard
//! GET  /admin/orders            - Order management
//! POST /admin/orders/{id}/status - Update an order's status
//! GET  /admin/products          - Product management
//! GET  /admin/products/new      - New product form
//! POST /admin/products          - Create product
//! GET  /admin/products/{id}/edit - Edit product form
//! POST /admin/products/{id}     - Update product
//! POST /admin/products/{id}/delete - Delete product
//! GET  /admin/analytics         - Sales analytics
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;
pub mod orders;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the auth routes router. Login is rate limited per IP.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::login_page))
        .route("/login", post(auth::login).layer(auth_rate_limiter()))
}

/// Create the admin console router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard::show))
        .route("/orders", get(admin::orders::index))
        .route("/orders/{id}/status", post(admin::orders::update_status))
        .route(
            "/products",
            get(admin::products::index).post(admin::products::create),
        )
        .route("/products/new", get(admin::products::new_form))
        .route(
            "/products/{id}",
            post(admin::products::update),
        )
        .route("/products/{id}/edit", get(admin::products::edit_form))
        .route("/products/{id}/delete", post(admin::products::delete))
        .route("/analytics", get(admin::analytics::show))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Shop
        .nest("/shop", shop_routes())
        // Marketing pages
        .route("/about", get(pages::about))
        .route("/faqs", get(pages::faqs))
        .route("/lookbook", get(pages::lookbook))
        .route("/trending", get(pages::trending))
        // Cart
        .nest("/cart", cart_routes())
        // Checkout & order tracking
        .route("/checkout", get(orders::checkout_page).post(orders::place))
        .route("/track-order", get(orders::track))
        // Auth entry (the access guard keeps signed-in visitors out)
        .nest("/authentication", auth_routes())
        // Logout lives outside the auth-entry section so signed-in
        // visitors can reach it
        .route("/logout", post(auth::logout))
        // Account
        .route("/user-detail", get(account::index))
        // Admin console
        .nest("/admin", admin_routes())
}
