//! Request-scoped data models: credential cookies and the cookie-backed cart.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartLine};
pub use session::{ROLE_COOKIE_NAME, TOKEN_COOKIE_NAME};
