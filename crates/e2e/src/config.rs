//! Connection settings for the service under test

use std::time::Duration;

use crate::error::{E2eError, E2eResult};

/// Where the persons service lives and how long to wait for it.
///
/// Passed to `PersonsClient` at construction; nothing here is global.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Scheme and host, e.g. `http://localhost`
    pub base_uri: String,

    /// TCP port of the service
    pub port: u16,

    /// Path prefix every resource path is appended to
    pub base_path: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// How long to poll for the service before giving up
    pub ready_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_uri: "http://localhost".to_string(),
            port: 14527,
            base_path: "/rs".to_string(),
            request_timeout: Duration::from_secs(30),
            ready_timeout: Duration::from_secs(30),
        }
    }
}

impl ServiceConfig {
    /// Config pointing at `base_uri:port` with the default path and timeouts
    pub fn new(base_uri: impl Into<String>, port: u16) -> Self {
        Self {
            base_uri: base_uri.into(),
            port,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> E2eResult<()> {
        if self.base_uri.trim().is_empty() {
            return Err(E2eError::InvalidConfig("base URI is empty".to_string()));
        }
        if self.port == 0 {
            return Err(E2eError::InvalidConfig("port must be non-zero".to_string()));
        }
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(E2eError::InvalidConfig(format!(
                "base path must start with '/': {}",
                self.base_path
            )));
        }
        Ok(())
    }

    /// Base URL all resource paths hang off, without a trailing slash
    pub fn base_url(&self) -> String {
        format!(
            "{}:{}{}",
            self.base_uri.trim_end_matches('/'),
            self.port,
            self.base_path.trim_end_matches('/')
        )
    }

    /// Absolute URL for a resource path such as `/persons/3`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}
