//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Upper-cases a size label for display (e.g., "xl" -> "XL").
///
/// Usage in templates: `{{ size|size_label }}`
#[askama::filter_fn]
pub fn size_label(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value.to_string().to_uppercase())
}
