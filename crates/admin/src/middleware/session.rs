//! Session middleware configuration for admin.
//!
//! Sessions only carry flash notices, so they live in memory. Cookies are
//! SameSite=Strict and HttpOnly with a 24h inactivity expiry.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::AdminConfig;
use crate::view::Notice;

/// Session cookie name for admin.
pub const SESSION_COOKIE_NAME: &str = "storedesk_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

const FLASH_KEY: &str = "flash_notice";

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}

/// Store a notice to show on the next rendered page.
///
/// # Errors
///
/// Returns error if the session store fails.
pub async fn set_flash(session: &Session, notice: Notice) -> Result<(), tower_sessions::session::Error> {
    session.insert(FLASH_KEY, notice).await
}

/// Take the pending notice, if any. A failing store is logged and treated
/// as having none.
pub async fn take_flash(session: &Session) -> Option<Notice> {
    match session.remove::<Notice>(FLASH_KEY).await {
        Ok(notice) => notice,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash notice");
            None
        }
    }
}
