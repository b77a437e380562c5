//! Authentication route handlers.
//!
//! This is the auth-state store the access guard sits downstream of: login
//! exchanges credentials with the backend and writes the two credential
//! cookies; logout clears them. The guard itself only ever reads them.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use silsila_core::Email;
use tracing::instrument;

use crate::backend::{BackendError, LoginRequest};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::guard::USER_HOME_PATH;
use crate::models::session::{
    ROLE_COOKIE_NAME, TOKEN_COOKIE_NAME, clear_credential_cookie, credential_cookie,
};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Display the login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate {
        error: None,
        email: String::new(),
    }
}

/// Login form payload.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Exchange credentials with the backend and set the credential cookies.
///
/// Bad credentials re-render the login page with an error rather than
/// failing the request.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(err) => {
            return Ok(LoginTemplate {
                error: Some(err.to_string()),
                email: form.email,
            }
            .into_response());
        }
    };

    let request = LoginRequest {
        email: email.as_str().to_string(),
        password: form.password,
    };

    let session = match state.backend().login(&request).await {
        Ok(session) => session,
        Err(BackendError::Api { status: 401, .. }) => {
            return Ok(LoginTemplate {
                error: Some("Incorrect email or password".to_string()),
                email: email.into_inner(),
            }
            .into_response());
        }
        Err(err) => return Err(AppError::from(err)),
    };

    tracing::info!(role = %session.role, "login succeeded");

    let secure = state.secure_cookies();
    let token_cookie = credential_cookie(TOKEN_COOKIE_NAME, &session.token, secure)
        .map_err(|e| AppError::Internal(format!("token cookie: {e}")))?;
    let role_cookie = credential_cookie(ROLE_COOKIE_NAME, &session.role, secure)
        .map_err(|e| AppError::Internal(format!("role cookie: {e}")))?;

    Ok((
        AppendHeaders([(SET_COOKIE, token_cookie), (SET_COOKIE, role_cookie)]),
        Redirect::to(USER_HOME_PATH),
    )
        .into_response())
}

/// Clear the credential cookies and return to the site root.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let secure = state.secure_cookies();
    let token_cookie = clear_credential_cookie(TOKEN_COOKIE_NAME, secure)
        .map_err(|e| AppError::Internal(format!("token cookie: {e}")))?;
    let role_cookie = clear_credential_cookie(ROLE_COOKIE_NAME, secure)
        .map_err(|e| AppError::Internal(format!("role cookie: {e}")))?;

    Ok((
        AppendHeaders([(SET_COOKIE, token_cookie), (SET_COOKIE, role_cookie)]),
        Redirect::to("/"),
    ))
}
