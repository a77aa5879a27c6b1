//! Storedesk Core - Shared types library.
//!
//! This crate provides common types used across all Storedesk components:
//! - `admin` - Back-office panel and the view-state controllers behind it
//! - `cli` - Command-line console over the same controllers
//!
//! # Architecture
//!
//! The core crate contains only types and pure derivations - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
