//! View-state lifecycle shared by every page.
//!
//! - [`controller`]: fetch-on-mount state holder with request-generation tickets
//! - [`edit`]: single-selection edit and reply surfaces
//! - [`filter`]: pure search/status projection over loaded lists
//! - [`error`]: dispatch and validation failures
//! - [`notice`]: transient user-visible notifications

pub mod controller;
pub mod edit;
pub mod error;
pub mod filter;
pub mod notice;

pub use controller::{ListController, LoadOutcome, ViewController, ViewState};
pub use edit::{EditState, ReplyState};
pub use error::{DispatchError, ValidationError};
pub use filter::{CommentFilter, NoFilter, ProductFilter, Searchable, StatusFilter, project};
pub use notice::{Notice, NoticeLevel};
