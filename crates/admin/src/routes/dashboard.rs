//! Dashboard route handler.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    filters, middleware::take_flash, pages::CounterState, state::AppState, view::Notice,
};

use super::{ListQuery, render};

/// Counter card for templates.
#[derive(Debug, Clone)]
pub struct CounterView {
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
}

impl From<&CounterState> for CounterView {
    fn from(counter: &CounterState) -> Self {
        Self {
            label: counter.counter.label(),
            value: counter.display(),
            error: counter.state.error.clone(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: &'static str,
    pub notice: Option<Notice>,
    pub counters: Vec<CounterView>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Dashboard page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let dashboard = &state.pages().dashboard;
    if query.wants_refresh() {
        dashboard.refresh().await;
    } else {
        dashboard.mount().await;
    }

    let counters = dashboard.counters().await;

    render(&DashboardTemplate {
        current_path: "/",
        notice: take_flash(&session).await,
        counters: counters.iter().map(CounterView::from).collect(),
    })
}
