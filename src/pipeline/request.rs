//! In-flight request state and the stage executor.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;

use crate::transport::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};

use super::hooks::Stage;
use super::{Context, Error, Hook, Hooks, Operation};

/// How much of each request the logging hooks emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Log nothing
    #[default]
    Off,
    /// Log method, URL and headers
    Debug,
    /// Also log request and response bodies
    DebugWithBody,
}

impl LogLevel {
    /// Returns true if any request logging is enabled.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Debug => "debug",
            Self::DebugWithBody => "debug_with_body",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "debug" => Ok(Self::Debug),
            "debug_with_body" | "body" => Ok(Self::DebugWithBody),
            _ => Err(format!(
                "unknown log level '{s}': expected off, debug or debug_with_body"
            )),
        }
    }
}

/// Input carried by a request until a build hook encodes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON document
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` pairs
    Form(Vec<(String, String)>),
    /// Pre-encoded bytes sent as is
    Raw(Vec<u8>),
}

impl Payload {
    /// Serializes `input` into a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `input` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(input: &T) -> Result<Self, Error> {
        serde_json::to_value(input).map(Self::Json).map_err(Error::Encode)
    }
}

/// Per-client request configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Base URL that operation paths are appended to
    pub endpoint: String,
    /// Transport; a shared default reqwest client when `None`
    pub client: Option<Arc<dyn HttpClient>>,
    /// Initial log level (a build hook may change it)
    pub log_level: LogLevel,
}

impl Config {
    /// Creates a configuration for `endpoint` with the default transport.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: None,
            log_level: LogLevel::Off,
        }
    }

    /// Sets the transport.
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.client = Some(client);
        self
    }
}

fn default_client() -> Arc<dyn HttpClient> {
    static CLIENT: OnceLock<Arc<ReqwestClient>> = OnceLock::new();
    let client = CLIENT.get_or_init(|| Arc::new(ReqwestClient::new()));
    Arc::clone(client) as Arc<dyn HttpClient>
}

/// Mutable state of one call as it moves through the stages.
///
/// Owned by the call that created it and consumed by [`Request::send`].
/// Hooks read and write the public fields.
pub struct Request {
    /// What is being called
    pub operation: Operation,
    /// Outgoing HTTP request (URL, method, headers, body)
    pub http: HttpRequest,
    /// Input not yet encoded into `http.body`
    pub payload: Option<Payload>,
    /// Transport used by the send hook
    pub client: Arc<dyn HttpClient>,
    /// Cancellation and deadline
    pub context: Context,
    /// Request logging verbosity
    pub log_level: LogLevel,
    /// Raw response, set by the send hook
    pub response: Option<HttpResponse>,
    /// Decoded output binding, set by the unmarshal hooks
    pub data: Option<serde_json::Value>,
    hooks: Hooks,
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("operation", &self.operation)
            .field("method", &self.http.method)
            .field("url", &self.http.url.as_str())
            .field("log_level", &self.log_level)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl Request {
    /// Builds a request for `operation` against `config.endpoint`.
    ///
    /// `hooks` is copied; later changes to either side do not affect the
    /// other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if endpoint + path is not a URL.
    pub fn new(
        config: &Config,
        operation: Operation,
        hooks: &Hooks,
        payload: Option<Payload>,
    ) -> Result<Self, Error> {
        let raw = format!(
            "{}{}",
            config.endpoint.trim_end_matches('/'),
            operation.path
        );
        let url = url::Url::parse(&raw).map_err(|e| Error::InvalidEndpoint {
            url: raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http: HttpRequest::new(operation.method.clone(), url),
            operation,
            payload,
            client: config.client.clone().unwrap_or_else(default_client),
            context: Context::background(),
            log_level: config.log_level,
            response: None,
            data: None,
            hooks: hooks.clone(),
        })
    }

    /// Appends per-call build hooks to this request's own hook snapshot.
    pub fn apply_options(&mut self, options: impl IntoIterator<Item = Hook>) {
        for option in options {
            self.hooks.build.push_back(option);
        }
    }

    /// Builder form of [`Request::apply_options`].
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = Hook>) -> Self {
        self.apply_options(options);
        self
    }

    /// Sets the context the suspending hooks honour.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Returns this request's hook snapshot.
    #[must_use]
    pub const fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Runs Build, Send and Unmarshal and returns the decoded output.
    ///
    /// Returns `Value::Null` when no unmarshal hook produced output.
    ///
    /// # Errors
    ///
    /// Returns the first error any hook produced.
    pub async fn send(mut self) -> Result<serde_json::Value, Error> {
        self.run_stages().await?;
        Ok(self.data.take().unwrap_or(serde_json::Value::Null))
    }

    /// Like [`Request::send`], then decodes the output into `T`.
    ///
    /// # Errors
    ///
    /// Returns the first hook error, or [`Error::Decode`] if the output does
    /// not have the shape of `T`.
    pub async fn send_into<T: DeserializeOwned>(mut self) -> Result<T, Error> {
        self.run_stages().await?;
        let status = self
            .response
            .as_ref()
            .map_or(http::StatusCode::OK, |r| r.status);
        let data = self.data.take().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(data).map_err(|source| Error::Decode { status, source })
    }

    async fn run_stages(&mut self) -> Result<(), Error> {
        let hooks = std::mem::take(&mut self.hooks);
        let span = tracing::debug_span!(
            "request",
            operation = %self.operation.name,
            method = %self.operation.method,
        );

        async {
            hooks.build.run(Stage::Build, self).await?;
            hooks.send.run(Stage::Send, self).await?;
            hooks.unmarshal.run(Stage::Unmarshal, self).await
        }
        .instrument(span)
        .await
    }
}

/// Builds and sends one request, decoding the output into `T`.
///
/// # Errors
///
/// See [`Request::new`] and [`Request::send_into`].
pub async fn execute<T: DeserializeOwned>(
    config: &Config,
    operation: Operation,
    hooks: &Hooks,
    payload: Option<Payload>,
    context: Context,
) -> Result<T, Error> {
    Request::new(config, operation, hooks, payload)?
        .with_context(context)
        .send_into()
        .await
}
