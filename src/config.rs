//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::{de, Deserialize, Deserializer};

use crate::error::{Result, ServiceError};

/// Port used when `PORT` is absent or empty.
pub const DEFAULT_PORT: &str = "8080";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// TCP port to bind, kept as a string like the environment hands it over.
    #[serde(default = "default_port")]
    pub port: String,

    /// Interface to bind.
    #[serde(default = "default_host")]
    pub bind_host: String,

    /// Port for the Prometheus exporter; disabled when unset or empty.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub metrics_port: Option<u16>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit JSON log lines instead of the human format.
    #[serde(default, deserialize_with = "empty_as_false")]
    pub log_json: bool,
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// An empty variable means unset.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid port {:?}", raw)))
}

fn empty_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "" => Ok(false),
        other => other
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid bool {:?}", other))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_host: default_host(),
            metrics_port: None,
            rust_log: default_log_level(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Deserialize configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter(vars)?)
    }

    /// Port string with the empty value folded into the default.
    pub fn effective_port(&self) -> &str {
        let port = self.port.trim();
        if port.is_empty() {
            DEFAULT_PORT
        } else {
            port
        }
    }

    /// Parsed TCP port.
    pub fn port_number(&self) -> Result<u16> {
        let port = self.effective_port();
        port.parse()
            .map_err(|_| ServiceError::InvalidPort(port.to_string()))
    }

    /// Address the main listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_host
            .trim()
            .parse()
            .map_err(|_| ServiceError::InvalidHost(self.bind_host.clone()))?;
        Ok(SocketAddr::new(ip, self.port_number()?))
    }

    /// Address of the Prometheus exporter, if enabled.
    pub fn metrics_addr(&self) -> Result<Option<SocketAddr>> {
        match self.metrics_port {
            Some(port) => Ok(Some(SocketAddr::new(self.socket_addr()?.ip(), port))),
            None => Ok(None),
        }
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        let addr = self.socket_addr()?;

        if let Some(port) = self.metrics_port {
            if port != 0 && port == addr.port() {
                return Err(ServiceError::InvalidPort(format!(
                    "METRICS_PORT {} collides with PORT",
                    port
                )));
            }
        }

        Ok(())
    }
}
