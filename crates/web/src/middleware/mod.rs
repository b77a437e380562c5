//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Access guard (cookie-based route protection)
//! 5. Security headers (CSP, frame options, etc.)
//! 6. Rate limiting on the login endpoint (governor)

pub mod guard;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;

pub use guard::{Credentials, Decision, access_guard, evaluate};
pub use rate_limit::auth_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
