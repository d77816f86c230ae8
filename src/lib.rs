//! Welcome and health JSON endpoints.
//!
//! Two fixed endpoints sit behind an exact-match route table:
//!
//! ```text
//! ANY /        -> 200 {"message":"Welcome from the Go service using Functions Framework!"}
//! ANY /health  -> 200 {"status":"ok"}
//! anything else -> 404
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Route table, dispatcher, handlers and response encoding
//! - [`server`]: Listener bootstrap
//! - [`metrics`]: Request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
