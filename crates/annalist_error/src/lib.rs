//! Error types for Annalist.
//!
//! This crate provides the foundation error types used throughout the Annalist workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use annalist_error::{AnnalistResult, ConfigError};
//!
//! fn load_token() -> AnnalistResult<String> {
//!     Err(ConfigError::new("DISCORD_TOKEN is not set"))?
//! }
//!
//! match load_token() {
//!     Ok(token) => println!("Got token of {} bytes", token.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod source;
mod storage;

pub use config::ConfigError;
pub use error::{AnnalistError, AnnalistErrorKind, AnnalistResult};
pub use json::JsonError;
pub use source::{SourceError, SourceErrorKind};
pub use storage::{StorageError, StorageErrorKind};
