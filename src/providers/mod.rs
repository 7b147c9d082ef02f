//! Provider clients assembled from operation descriptors and hook sets.
//!
//! Every client is configured through [`ClientConfig`]: an endpoint, an
//! optional hook set (empty means "use the provider's defaults"), a log
//! level and the transport timeout. Operations come in pairs: a
//! `*_request` method that returns the unsent [`Request`](crate::pipeline::Request)
//! for callers who want to add per-call hooks, and an async method that
//! sends it and decodes the typed response.

pub mod daraja;
pub mod quikk;
pub mod tanda;


use std::sync::Arc;
use std::time::Duration;

use crate::pipeline::{self, Error, Hooks, LogLevel, corehooks};
use crate::transport::{HttpClient, ReqwestClient};

/// Timeout of the transport used for business operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings shared by all provider clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. a provider's sandbox or production host
    pub endpoint: String,
    /// Hook set; the provider's defaults are used when empty
    pub hooks: Hooks,
    /// Request logging verbosity
    pub log_level: LogLevel,
    /// Timeout of the business-operation transport
    pub timeout: Duration,
    /// Transport override; when set it is used for every call,
    /// authentication included
    pub client: Option<Arc<dyn HttpClient>>,
}

impl ClientConfig {
    /// Creates a configuration with default hooks and timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            hooks: Hooks::default(),
            log_level: LogLevel::Off,
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Replaces the provider's default hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Sets the request log level.
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Sets the business-operation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the transport.
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Returns the transport override, or a reqwest client bounded by
    /// `timeout`.
    pub(crate) fn transport(&self, timeout: Duration) -> Result<Arc<dyn HttpClient>, Error> {
        if let Some(client) = &self.client {
            return Ok(Arc::clone(client));
        }
        let client = ReqwestClient::with_timeout(timeout)?;
        Ok(Arc::new(client))
    }

    /// Resolves the pipeline configuration and hook set of a client.
    ///
    /// Empty hooks are replaced by `defaults`; the configured log level
    /// is pushed to the front of the build stage either way.
    pub(crate) fn resolve(
        &self,
        defaults: impl FnOnce() -> Hooks,
    ) -> Result<(pipeline::Config, Hooks), Error> {
        let mut hooks = if self.hooks.is_empty() {
            defaults()
        } else {
            self.hooks.clone()
        };
        hooks
            .build
            .push_front(corehooks::with_log_level(self.log_level));

        let config = pipeline::Config {
            endpoint: self.endpoint.clone(),
            client: Some(self.transport(self.timeout)?),
            log_level: self.log_level,
        };
        Ok((config, hooks))
    }
}
