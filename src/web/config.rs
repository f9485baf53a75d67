//! Web server configuration.

use crate::error::{ExporterError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the metrics HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
    /// Path the metrics are served under
    pub metrics_path: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_WEB_PORT,
            metrics_path: "/metrics".to_string(),
        }
    }
}

impl WebConfig {
    /// Create a new web configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Build a configuration from a `host:port` listen address.
    ///
    /// An empty host (`:9184`) binds all interfaces. Bracketed IPv6 hosts
    /// such as `[::1]:9184` are accepted.
    pub fn from_listen_address(address: &str) -> Result<Self> {
        let (host, port) = address.rsplit_once(':').ok_or_else(|| {
            ExporterError::config_error(format!("listen address {address:?} has no port"))
        })?;

        let port = port.parse::<u16>().map_err(|e| {
            ExporterError::config_error(format!("invalid port in listen address {address:?}: {e}"))
        })?;

        let host = host.trim_start_matches('[').trim_end_matches(']');
        let host = if host.is_empty() { "0.0.0.0" } else { host };

        Ok(Self::new(host, port))
    }

    /// Set the host for the web server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the web server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the path the metrics are served under.
    pub fn with_metrics_path(mut self, path: impl Into<String>) -> Self {
        self.metrics_path = path.into();
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
