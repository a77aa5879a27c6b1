//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//! 4. Session layer (tower-sessions, in-memory, flash notices only)

pub mod security_headers;
pub mod session;

pub use security_headers::security_headers_middleware;
pub use session::{create_session_layer, set_flash, take_flash};
