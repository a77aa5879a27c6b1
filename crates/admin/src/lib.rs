//! Storedesk Admin library.
//!
//! Back office for a shop backend that speaks plain REST/JSON: products,
//! comment moderation, contact messages and customers.
//!
//! # Layers
//!
//! - [`backend`]: reqwest client for the shop API and the [`backend::AdminApi`] trait
//! - [`models`]: backend records with explicit display defaults
//! - [`view`]: view-state controllers, edit surfaces, search/status projection
//! - [`pages`]: one controller per admin section, including its mutations
//! - [`routes`]: server-rendered pages (axum + askama) over the page controllers
//!
//! The `desk` CLI drives the same [`pages`] against the same backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod routes;
pub mod state;
pub mod view;

use axum::Router;

use crate::state::AppState;

/// The admin router with sessions and security headers applied.
///
/// Request tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    routes::routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .with_state(state)
}
