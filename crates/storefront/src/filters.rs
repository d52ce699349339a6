//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::borrow::Borrow;
use std::fmt::Display;

use alraqi_core::Price;

/// Formats a price with thousands separators and the currency suffix.
///
/// Usage in templates: `{{ order.total|currency }}` renders `12,500 ج.س`
#[askama::filter_fn]
pub fn currency(value: impl Borrow<Price>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(value.borrow().grouped())
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}
