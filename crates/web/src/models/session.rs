//! Credential cookie names and helpers.
//!
//! The backend issues a session token and a role claim at login; this
//! front-end carries them as two request cookies. The access guard reads
//! them, the `/authentication` handlers write them, and nothing else
//! touches them.

use axum::http::{HeaderMap, HeaderValue, header::InvalidHeaderValue};

/// Cookie holding the opaque session token.
pub const TOKEN_COOKIE_NAME: &str = "silsila_token";

/// Cookie holding the role claim.
pub const ROLE_COOKIE_NAME: &str = "silsila_role";

/// Credential cookie lifetime in seconds (7 days).
const COOKIE_MAX_AGE_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Extract a named cookie's value from the request headers.
///
/// Returns `None` when the `Cookie` header is missing, unreadable, or does
/// not carry the named pair. No validation of the value itself.
#[must_use]
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(axum::http::header::COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == name {
            return Some(val.to_string());
        }
    }
    None
}

/// Build a `Set-Cookie` value for a credential cookie.
///
/// `HttpOnly` and `SameSite=Lax` always; `Secure` only when the site is
/// served over HTTPS, so local development keeps working.
///
/// # Errors
///
/// Returns an error if the cookie value contains characters that are not
/// valid in an HTTP header.
pub fn credential_cookie(
    name: &str,
    value: &str,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie =
        format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={COOKIE_MAX_AGE_SECONDS}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build a `Set-Cookie` value that clears a credential cookie.
///
/// # Errors
///
/// Returns an error if the cookie name contains characters that are not
/// valid in an HTTP header.
pub fn clear_credential_cookie(name: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_str(value).expect("valid header"),
        );
        headers
    }

    #[test]
    fn test_cookie_value_single_pair() {
        let headers = headers_with_cookie("silsila_token=abc123");
        assert_eq!(
            cookie_value(&headers, TOKEN_COOKIE_NAME),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_cookie_value_multiple_pairs() {
        let headers = headers_with_cookie("other=1; silsila_token=abc; silsila_role=admin");
        assert_eq!(
            cookie_value(&headers, TOKEN_COOKIE_NAME),
            Some("abc".to_string())
        );
        assert_eq!(
            cookie_value(&headers, ROLE_COOKIE_NAME),
            Some("admin".to_string())
        );
    }

    #[test]
    fn test_cookie_value_missing() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, TOKEN_COOKIE_NAME), None);

        let headers = headers_with_cookie("unrelated=x");
        assert_eq!(cookie_value(&headers, TOKEN_COOKIE_NAME), None);
    }

    #[test]
    fn test_cookie_value_whitespace_tolerant() {
        let headers = headers_with_cookie("  silsila_role = admin ;silsila_token=t");
        assert_eq!(
            cookie_value(&headers, ROLE_COOKIE_NAME),
            Some("admin".to_string())
        );
        assert_eq!(
            cookie_value(&headers, TOKEN_COOKIE_NAME),
            Some("t".to_string())
        );
    }

    #[test]
    fn test_credential_cookie_attributes() {
        let cookie = credential_cookie(TOKEN_COOKIE_NAME, "abc", true).expect("valid cookie");
        let value = cookie.to_str().expect("ascii");
        assert!(value.starts_with("silsila_token=abc"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Secure"));

        let insecure = credential_cookie(TOKEN_COOKIE_NAME, "abc", false).expect("valid cookie");
        assert!(!insecure.to_str().expect("ascii").contains("Secure"));
    }

    #[test]
    fn test_clear_credential_cookie_expires_immediately() {
        let cookie = clear_credential_cookie(ROLE_COOKIE_NAME, false).expect("valid cookie");
        let value = cookie.to_str().expect("ascii");
        assert!(value.starts_with("silsila_role=;"));
        assert!(value.contains("Max-Age=0"));
    }
}
