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

/// Turns a status label into a CSS modifier (`"Needs Review"` -> `needs-review`).
///
/// Usage in templates: `<span class="chip chip-{{ comment.status|chip }}">`
#[askama::filter_fn]
pub fn chip(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(css_modifier(&value.to_string()))
}

fn css_modifier(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
