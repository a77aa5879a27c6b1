//! Command implementations.
//!
//! Every command drives the same page controllers as the web panel, so
//! validation, reconciliation and notices behave identically.

pub mod comments;
pub mod customers;
pub mod messages;
pub mod products;
pub mod stats;

use std::sync::Arc;

use storedesk_admin::backend::{ApiError, BackendClient};
use storedesk_admin::config::{BackendConfig, ConfigError, parse_backend_url};
use storedesk_admin::export::ExportError;
use storedesk_admin::pages::Pages;
use storedesk_admin::view::{DispatchError, LoadOutcome, Notice, NoticeLevel, ValidationError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backend client could not be built.
    #[error(transparent)]
    Client(#[from] ApiError),

    /// A mutation was rejected locally or by the backend.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Input was rejected before any request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A list could not be loaded.
    #[error("Failed to load {resource}: {message}")]
    Load {
        resource: &'static str,
        message: String,
    },

    /// An argument was not understood.
    #[error("{0}")]
    Usage(String),

    /// The requested record is not in the loaded list.
    #[error("No {0} found")]
    NotFound(String),

    /// Reading an upload or writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The export document could not be built.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CommandError {
    fn usage(error: impl std::fmt::Display) -> Self {
        Self::Usage(error.to_string())
    }
}

/// Build page controllers over a client for the configured backend.
///
/// `backend_url` overrides `BACKEND_URL`.
///
/// # Errors
///
/// Returns error if the configuration is invalid or the client fails to build.
pub fn connect(backend_url: Option<&str>) -> Result<Pages, CommandError> {
    dotenvy::dotenv().ok();

    let mut config = BackendConfig::from_env()?;
    if let Some(url) = backend_url {
        config.base_url = parse_backend_url(url)?;
    }

    tracing::debug!("Using backend at {}", config.base_url);
    let client = BackendClient::new(&config)?;
    Ok(Pages::new(Arc::new(client)))
}

/// Turn a failed initial load into an error.
fn ensure_loaded(
    outcome: LoadOutcome,
    resource: &'static str,
    error: Option<String>,
) -> Result<(), CommandError> {
    match outcome {
        LoadOutcome::Failed => Err(CommandError::Load {
            resource,
            message: error.unwrap_or_else(|| "unknown error".to_owned()),
        }),
        LoadOutcome::Loaded | LoadOutcome::Stale | LoadOutcome::Skipped => Ok(()),
    }
}

/// Log a mutation's notice at the matching level and pass the result on.
fn report<T>(
    result: Result<T, DispatchError>,
    success: &str,
    failure: &str,
) -> Result<T, CommandError> {
    let notice = Notice::from_outcome(&result, success, failure);
    log_notice(&notice);
    Ok(result?)
}

fn log_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success | NoticeLevel::Info => tracing::info!("{}", notice.text),
        NoticeLevel::Error => tracing::error!("{}", notice.text),
    }
}
