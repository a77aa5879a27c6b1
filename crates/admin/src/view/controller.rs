//! Fetch/display state holder.
//!
//! A [`ViewController`] owns the data behind one page section together with
//! its loading flag and last error. Every load takes a ticket from a
//! generation counter; the response is applied only if no newer load, local
//! change or [`ViewController::detach`] happened while it was in flight. The state
//! lock is never held across the fetch.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::models::Entity;

/// Snapshot of a view's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<D> {
    /// Last successfully loaded data (the initial value before any success).
    pub data: D,
    /// A load is in flight.
    pub loading: bool,
    /// Message of the most recent failed load, cleared by the next success.
    pub error: Option<String>,
    /// At least one load has been applied.
    pub loaded: bool,
}

/// What happened to a load's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Response applied as the new data.
    Loaded,
    /// Failure applied as the new error; data kept.
    Failed,
    /// A newer load or a detach superseded this one; response discarded.
    Stale,
    /// `mount` found the view already loaded and issued nothing.
    Skipped,
}

/// State holder for one fetched resource.
#[derive(Debug)]
pub struct ViewController<D> {
    resource: &'static str,
    state: RwLock<ViewState<D>>,
    generation: AtomicU64,
}

/// A controller over a list of entities.
pub type ListController<T> = ViewController<Vec<T>>;

impl<D: Default> ViewController<D> {
    /// Create an unloaded controller holding `D::default()`.
    #[must_use]
    pub fn new(resource: &'static str) -> Self {
        Self::with_initial(resource, D::default())
    }
}

impl<D> ViewController<D> {
    /// Create an unloaded controller holding `initial`.
    #[must_use]
    pub fn with_initial(resource: &'static str, initial: D) -> Self {
        Self {
            resource,
            state: RwLock::new(ViewState {
                data: initial,
                loading: false,
                error: None,
                loaded: false,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch and apply unless superseded.
    pub async fn load<F, E>(&self, fetch: F) -> LoadOutcome
    where
        F: Future<Output = Result<D, E>>,
        E: Display,
    {
        let ticket = {
            let mut state = self.state.write().await;
            state.loading = true;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = fetch.await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(resource = self.resource, ticket, "Discarding stale response");
            return LoadOutcome::Stale;
        }

        state.loading = false;
        match result {
            Ok(data) => {
                state.data = data;
                state.error = None;
                state.loaded = true;
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!(resource = self.resource, error = %e, "Failed to load");
                state.error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Load only if nothing has been loaded yet (fetch-on-mount).
    ///
    /// A failed load leaves the view unloaded, so the next mount retries.
    pub async fn mount<F, E>(&self, fetch: F) -> LoadOutcome
    where
        F: Future<Output = Result<D, E>>,
        E: Display,
    {
        if self.state.read().await.loaded {
            return LoadOutcome::Skipped;
        }
        self.load(fetch).await
    }

    /// Invalidate every outstanding load (unmount).
    pub async fn detach(&self) {
        let mut state = self.state.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.loading = false;
    }

    /// Apply a local change to the data.
    ///
    /// Loads issued before the change come back [`LoadOutcome::Stale`], so an
    /// older list cannot overwrite it.
    pub async fn update<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        let mut state = self.state.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        state.loading = false;
        f(&mut state.data)
    }

    /// Read the data without cloning it.
    pub async fn with<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&self.state.read().await.data)
    }
}

impl<D: Clone> ViewController<D> {
    /// Clone the current state.
    pub async fn snapshot(&self) -> ViewState<D> {
        self.state.read().await.clone()
    }
}

impl<T: Entity> ViewController<Vec<T>> {
    /// Remove the entity with `id`. Returns whether one was removed.
    pub async fn remove(&self, id: T::Id) -> bool {
        self.update(|items| {
            let before = items.len();
            items.retain(|item| item.id() != id);
            items.len() != before
        })
        .await
    }

    /// Replace the entity with the same id in place. Returns whether one matched.
    pub async fn replace(&self, entity: T) -> bool {
        self.update(|items| {
            let id = entity.id();
            match items.iter_mut().find(|item| item.id() == id) {
                Some(slot) => {
                    *slot = entity;
                    true
                }
                None => false,
            }
        })
        .await
    }

    /// Append a newly created entity.
    pub async fn append(&self, entity: T) {
        self.update(|items| items.push(entity)).await;
    }

    /// Clone the entity with `id`, if loaded.
    pub async fn find(&self, id: T::Id) -> Option<T> {
        self.with(|items| items.iter().find(|item| item.id() == id).cloned())
            .await
    }
}
