//! Route access guard.
//!
//! Classifies every inbound request path against an ordered rule table and
//! the two credential cookies, and either lets the request through or
//! replaces it with a redirect. The decision logic is a pure function of
//! `(path, credentials)` so it can be tested without a running server; the
//! axum layer at the bottom of this module is a thin cookie-reading shim.
//!
//! # Route classes (first match wins)
//!
//! | Prefix            | Class          | No token          | Token, wrong role | Token + admin |
//! |-------------------|----------------|-------------------|-------------------|---------------|
//! | `/authentication` | auth entry     | allow             | redirect `/user-detail` | redirect `/user-detail` |
//! | `/user-detail`    | user-protected | redirect `/authentication` | allow    | allow         |
//! | `/admin`          | admin-protected| redirect `/authentication` | redirect `/` | allow     |
//! | anything else     | unmatched      | allow             | allow             | allow         |
//!
//! The two redirect targets for admin routes are deliberately distinct:
//! an unauthenticated caller is sent to the login flow, an authenticated
//! caller without the admin role is sent back to the site root.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::models::session::{ROLE_COOKIE_NAME, TOKEN_COOKIE_NAME, cookie_value};

/// Login flow entry point. Already-authenticated visitors are bounced away
/// from it; unauthenticated visitors are sent to it.
pub const AUTH_ENTRY_PATH: &str = "/authentication";

/// Authenticated landing route.
pub const USER_HOME_PATH: &str = "/user-detail";

/// Admin console section.
pub const ADMIN_PATH: &str = "/admin";

/// Site root; target for authenticated-but-unauthorized admin access.
pub const ROOT_PATH: &str = "/";

/// The only role claim value with elevated meaning.
pub const ADMIN_ROLE: &str = "admin";

/// Access requirement for a protected route section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Login pages: reachable only without a session token.
    AuthEntry,
    /// Requires a session token; role is irrelevant.
    User,
    /// Requires a session token and the admin role claim.
    Admin,
}

/// One entry in the protected-route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    /// Path prefix; matches the prefix itself and any sub-path under it.
    pub prefix: &'static str,
    /// Requirement enforced on the section.
    pub access: Access,
}

/// Ordered protected-route table. Evaluation is first-match-wins, so the
/// auth-entry rule must stay ahead of the protected sections.
pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        prefix: AUTH_ENTRY_PATH,
        access: Access::AuthEntry,
    },
    RouteRule {
        prefix: USER_HOME_PATH,
        access: Access::User,
    },
    RouteRule {
        prefix: ADMIN_PATH,
        access: Access::Admin,
    },
];

/// Credential cookies carried on a request, as seen by the guard.
///
/// The guard only reads these - it never validates their format beyond
/// presence and an equality check on the role. A malformed or empty value
/// behaves exactly like an absent one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Credentials<'a> {
    /// Opaque session token; presence denotes "authenticated".
    pub token: Option<&'a str>,
    /// Role claim; only the exact value `"admin"` is significant.
    pub role: Option<&'a str>,
}

impl Credentials<'_> {
    fn is_authenticated(&self) -> bool {
        self.token.is_some_and(|t| !t.is_empty())
    }

    fn is_admin(&self) -> bool {
        self.role == Some(ADMIN_ROLE)
    }
}

/// Outcome of guarding a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Let the request continue unmodified.
    Allow,
    /// Replace the response with a redirect to the given path.
    Redirect(&'static str),
}

/// Does `path` fall inside the section rooted at `prefix`?
///
/// Matches the prefix itself and any nested path under it (`/admin` and
/// `/admin/orders`, but not `/administrator`), so new sub-pages of a
/// protected section inherit its protection without registration.
fn in_section(prefix: &str, path: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Classify a request path and decide whether it may proceed.
///
/// Pure and stateless: the same `(path, credentials)` pair always yields the
/// same decision, and nothing is mutated. Paths outside every rule fall
/// through to [`Decision::Allow`].
#[must_use]
pub fn evaluate(path: &str, credentials: &Credentials<'_>) -> Decision {
    for rule in ROUTE_RULES {
        if !in_section(rule.prefix, path) {
            continue;
        }
        return match rule.access {
            Access::AuthEntry => {
                if credentials.is_authenticated() {
                    Decision::Redirect(USER_HOME_PATH)
                } else {
                    Decision::Allow
                }
            }
            Access::User => {
                if credentials.is_authenticated() {
                    Decision::Allow
                } else {
                    Decision::Redirect(AUTH_ENTRY_PATH)
                }
            }
            Access::Admin => {
                if !credentials.is_authenticated() {
                    Decision::Redirect(AUTH_ENTRY_PATH)
                } else if credentials.is_admin() {
                    Decision::Allow
                } else {
                    Decision::Redirect(ROOT_PATH)
                }
            }
        };
    }
    Decision::Allow
}

/// Guard middleware: read the credential cookies, classify the path, and
/// either forward the request or short-circuit with a redirect.
///
/// Layer this with `axum::middleware::from_fn(access_guard)` near the top of
/// the router so every route is covered.
pub async fn access_guard(request: Request, next: Next) -> Response {
    let token = cookie_value(request.headers(), TOKEN_COOKIE_NAME);
    let role = cookie_value(request.headers(), ROLE_COOKIE_NAME);
    let credentials = Credentials {
        token: token.as_deref(),
        role: role.as_deref(),
    };

    match evaluate(request.uri().path(), &credentials) {
        Decision::Allow => next.run(request).await,
        Decision::Redirect(target) => {
            tracing::debug!(path = %request.uri().path(), %target, "access guard redirect");
            Redirect::to(target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> Credentials<'static> {
        Credentials::default()
    }

    fn customer() -> Credentials<'static> {
        Credentials {
            token: Some("abc"),
            role: Some("customer"),
        }
    }

    fn admin() -> Credentials<'static> {
        Credentials {
            token: Some("abc"),
            role: Some("admin"),
        }
    }

    #[test]
    fn test_auth_entry_redirects_authenticated_caller() {
        assert_eq!(
            evaluate("/authentication", &customer()),
            Decision::Redirect(USER_HOME_PATH)
        );
        assert_eq!(
            evaluate("/authentication/register", &admin()),
            Decision::Redirect(USER_HOME_PATH)
        );
    }

    #[test]
    fn test_auth_entry_allows_anonymous() {
        assert_eq!(evaluate("/authentication", &anonymous()), Decision::Allow);
        assert_eq!(
            evaluate("/authentication/reset", &anonymous()),
            Decision::Allow
        );
    }

    #[test]
    fn test_user_section_requires_token() {
        assert_eq!(
            evaluate("/user-detail", &anonymous()),
            Decision::Redirect(AUTH_ENTRY_PATH)
        );
        assert_eq!(
            evaluate("/user-detail/orders", &anonymous()),
            Decision::Redirect(AUTH_ENTRY_PATH)
        );
    }

    #[test]
    fn test_user_section_ignores_role() {
        assert_eq!(evaluate("/user-detail", &customer()), Decision::Allow);
        assert_eq!(evaluate("/user-detail/profile", &admin()), Decision::Allow);
        // Token present with no role claim at all is still enough.
        let token_only = Credentials {
            token: Some("abc"),
            role: None,
        };
        assert_eq!(evaluate("/user-detail", &token_only), Decision::Allow);
    }

    #[test]
    fn test_admin_section_no_token_goes_to_login() {
        assert_eq!(
            evaluate("/admin/orders", &anonymous()),
            Decision::Redirect(AUTH_ENTRY_PATH)
        );
    }

    #[test]
    fn test_admin_section_wrong_role_goes_to_root() {
        // Unauthorized (not unauthenticated): distinct target.
        assert_eq!(
            evaluate("/admin/orders", &customer()),
            Decision::Redirect(ROOT_PATH)
        );
    }

    #[test]
    fn test_admin_section_admin_allowed() {
        assert_eq!(evaluate("/admin", &admin()), Decision::Allow);
        assert_eq!(evaluate("/admin/products/3/edit", &admin()), Decision::Allow);
    }

    #[test]
    fn test_unmatched_paths_always_allowed() {
        for credentials in [anonymous(), customer(), admin()] {
            assert_eq!(evaluate("/shop", &credentials), Decision::Allow);
            assert_eq!(evaluate("/", &credentials), Decision::Allow);
            assert_eq!(evaluate("/cart/add", &credentials), Decision::Allow);
        }
    }

    #[test]
    fn test_prefix_requires_segment_boundary() {
        // Lookalike prefixes are not part of the protected section.
        assert_eq!(evaluate("/administrator", &anonymous()), Decision::Allow);
        assert_eq!(evaluate("/user-details", &anonymous()), Decision::Allow);
        assert_eq!(
            evaluate("/authentication-help", &customer()),
            Decision::Allow
        );
    }

    #[test]
    fn test_empty_token_treated_as_absent() {
        let empty = Credentials {
            token: Some(""),
            role: Some("admin"),
        };
        assert_eq!(
            evaluate("/admin", &empty),
            Decision::Redirect(AUTH_ENTRY_PATH)
        );
        assert_eq!(evaluate("/authentication", &empty), Decision::Allow);
    }

    #[test]
    fn test_role_compared_for_exact_equality() {
        for role in ["Admin", "ADMIN", " admin", "administrator"] {
            let credentials = Credentials {
                token: Some("abc"),
                role: Some(role),
            };
            assert_eq!(
                evaluate("/admin", &credentials),
                Decision::Redirect(ROOT_PATH),
                "role {role:?} must not pass the equality check"
            );
        }
    }

    #[test]
    fn test_decision_is_idempotent() {
        let inputs: &[(&str, Credentials<'_>)] = &[
            ("/authentication", customer()),
            ("/user-detail/orders", anonymous()),
            ("/admin/orders", customer()),
            ("/shop", anonymous()),
        ];
        for (path, credentials) in inputs {
            assert_eq!(evaluate(path, credentials), evaluate(path, credentials));
        }
    }

    #[test]
    fn test_rule_table_ordering() {
        // Auth entry must precede the protected sections; the table drives
        // first-match-wins evaluation.
        assert_eq!(ROUTE_RULES.len(), 3);
        assert!(matches!(ROUTE_RULES.first(), Some(rule) if rule.access == Access::AuthEntry));
        let prefixes: Vec<&str> = ROUTE_RULES.iter().map(|r| r.prefix).collect();
        assert_eq!(
            prefixes,
            vec![AUTH_ENTRY_PATH, USER_HOME_PATH, ADMIN_PATH]
        );
    }
}
