//! Sign-in page.
//!
//! The panel has no accounts of its own; this page only points operators
//! at the network-level access the deployment relies on.

use askama::Template;
use axum::{
    Router,
    response::{Html, IntoResponse},
    routing::get,
};

use crate::{filters, state::AppState, view::Notice};

/// Sign-in page template.
#[derive(Template)]
#[template(path = "auth/sign_in.html")]
struct SignInTemplate {
    current_path: &'static str,
    notice: Option<Notice>,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/sign-in", get(sign_in_page))
}

/// Render the sign-in page.
///
/// GET /auth/sign-in
async fn sign_in_page() -> impl IntoResponse {
    Html(
        SignInTemplate {
            current_path: "/auth/sign-in",
            notice: None,
        }
        .render()
        .unwrap_or_else(|_| String::from("Error rendering template")),
    )
}
