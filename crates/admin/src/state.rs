//! Application state shared across handlers.

use std::sync::Arc;

use url::Url;

use crate::backend::{AdminApi, ApiError, BackendClient};
use crate::config::AdminConfig;
use crate::pages::Pages;

/// Application state shared across all handlers.
///
/// Page controllers live here, so loaded data survives between requests
/// and a page only refetches on first view or when asked to refresh.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pages: Pages,
}

impl AppState {
    /// Build state with a real backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let client = BackendClient::new(&config.backend)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Build state over any [`AdminApi`] implementation.
    #[must_use]
    pub fn with_api(config: AdminConfig, api: Arc<dyn AdminApi>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                pages: Pages::new(api),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pages(&self) -> &Pages {
        &self.inner.pages
    }

    /// Origin that relative image paths resolve against.
    #[must_use]
    pub fn backend_origin(&self) -> &Url {
        &self.inner.config.backend.base_url
    }
}
