//! Unified error types for the welcome service.

use std::net::SocketAddr;

use thiserror::Error;

/// Unified error type for the welcome service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// `PORT` is not a valid TCP port.
    #[error("invalid port {0:?}")]
    InvalidPort(String),

    /// `BIND_HOST` is not a valid IP address.
    #[error("invalid host {0:?}")]
    InvalidHost(String),

    /// The listener could not be established or the serve loop died.
    #[error("failed to start listener on {addr}: {source}")]
    Startup {
        /// Address the service tried to bind.
        addr: SocketAddr,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The Prometheus exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(String),

    /// The same path was registered twice.
    #[error("route {0:?} registered more than once")]
    DuplicateRoute(String),
}

impl ServiceError {
    /// Whether this error belongs to the startup failure kind.
    pub fn is_startup(&self) -> bool {
        matches!(self, ServiceError::Startup { .. })
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
