//! In-process tests for cookie-based route access.
//!
//! Each test drives the real application router with `tower::oneshot` and
//! asserts where the guard sends (or does not send) the request. No handler
//! behind a protected route is allowed to succeed here - the backend URL
//! points at a dead port - so a non-redirect status is proof the guard let
//! the request through.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use silsila_integration_tests::test_app;
use tower::ServiceExt;

async fn get_with_cookies(path: &str, cookies: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    let request = builder.body(Body::empty()).expect("valid request");
    test_app().oneshot(request).await.expect("router response")
}

fn location(response: &axum::response::Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

// ============================================================================
// Public routes
// ============================================================================

#[tokio::test]
async fn test_health_is_open() {
    let response = get_with_cookies("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.expect("body").to_bytes();
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn test_public_pages_open_without_cookies() {
    for path in ["/about", "/faqs"] {
        let response = get_with_cookies(path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn test_public_pages_open_with_session() {
    let response =
        get_with_cookies("/about", Some("silsila_token=tok123; silsila_role=user")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Auth entry section
// ============================================================================

#[tokio::test]
async fn test_login_page_open_when_signed_out() {
    let response = get_with_cookies("/authentication", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_page_bounces_signed_in_visitors() {
    let response = get_with_cookies("/authentication", Some("silsila_token=tok123")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/user-detail"));
}

#[tokio::test]
async fn test_login_action_bounces_signed_in_visitors() {
    // The whole /authentication section is covered, nested paths included.
    let response = get_with_cookies("/authentication/login", Some("silsila_token=tok123")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/user-detail"));
}

// ============================================================================
// User section
// ============================================================================

#[tokio::test]
async fn test_account_requires_session() {
    let response = get_with_cookies("/user-detail", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/authentication"));
}

#[tokio::test]
async fn test_account_redirect_covers_nested_paths() {
    let response = get_with_cookies("/user-detail/orders", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/authentication"));
}

#[tokio::test]
async fn test_account_open_with_session() {
    // The guard passes the request through; the handler then fails on the
    // dead backend, which is exactly the proof we want.
    let response = get_with_cookies("/user-detail", Some("silsila_token=tok123")).await;
    assert_ne!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn test_empty_token_counts_as_signed_out() {
    let response = get_with_cookies("/user-detail", Some("silsila_token=")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/authentication"));
}

// ============================================================================
// Admin section
// ============================================================================

#[tokio::test]
async fn test_admin_requires_session() {
    let response = get_with_cookies("/admin", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/authentication"));
}

#[tokio::test]
async fn test_admin_rejects_non_admin_role() {
    let response =
        get_with_cookies("/admin", Some("silsila_token=tok123; silsila_role=user")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_admin_role_is_case_sensitive() {
    let response =
        get_with_cookies("/admin", Some("silsila_token=tok123; silsila_role=Admin")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_admin_open_with_admin_role() {
    let response =
        get_with_cookies("/admin", Some("silsila_token=tok123; silsila_role=admin")).await;
    assert_ne!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).is_none());
}

#[tokio::test]
async fn test_admin_nested_paths_covered() {
    let response = get_with_cookies(
        "/admin/orders",
        Some("silsila_token=tok123; silsila_role=user"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
}

#[tokio::test]
async fn test_prefix_match_respects_segment_boundaries() {
    // /administrator is not inside the /admin section; it falls through to
    // the router, which has no such route.
    let response = get_with_cookies("/administrator", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_reachable_while_signed_in() {
    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::COOKIE, "silsila_token=tok123; silsila_role=user")
        .body(Body::empty())
        .expect("valid request");
    let response = test_app().oneshot(request).await.expect("router response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    // Both credential cookies are cleared.
    let cleared: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(cleared.iter().any(|c| c.starts_with("silsila_token=") && c.contains("Max-Age=0")));
    assert!(cleared.iter().any(|c| c.starts_with("silsila_role=") && c.contains("Max-Age=0")));
}

// ============================================================================
// Ambient response headers
// ============================================================================

#[tokio::test]
async fn test_security_headers_applied() {
    let response = get_with_cookies("/health", None).await;
    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").map(|v| v.to_str().ok()), Some(Some("DENY")));
    assert_eq!(
        headers.get("x-content-type-options").map(|v| v.to_str().ok()),
        Some(Some("nosniff"))
    );
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_request_id_header_applied() {
    let response = get_with_cookies("/health", None).await;
    assert!(response.headers().contains_key("x-request-id"));
}
