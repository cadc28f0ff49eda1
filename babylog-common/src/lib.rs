//! # Baby Log Common Library
//!
//! Shared code for the baby log application including:
//! - The canonical log record schema and normalizer
//! - Passphrase-derived identity and session state
//! - Storage backends (local SQLite, remote REST table) and the facade
//! - Export/import helpers
//! - Configuration loading

pub mod config;
pub mod error;
pub mod identity;
pub mod schema;
pub mod store;
pub mod transfer;

pub use error::{Error, Result};
pub use schema::LogRecord;
