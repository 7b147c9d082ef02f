//! Reusable hooks every provider client is assembled from.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::transport::{HttpClient, HttpResponse};

use super::{Error, Handler, Hook, Hooks, LogLevel, Payload, ProviderError, Request};

/// Hook names, for inspecting hook lists.
pub mod name {
    /// [`super::with_http_client`]
    pub const WITH_HTTP_CLIENT: &str = "core.with_http_client";
    /// [`super::with_request_header`]
    pub const WITH_REQUEST_HEADER: &str = "core.with_request_header";
    /// [`super::with_log_level`]
    pub const WITH_LOG_LEVEL: &str = "core.with_log_level";
    /// [`super::set_basic_auth`]
    pub const SET_BASIC_AUTH: &str = "core.set_basic_auth";
    /// [`super::encode_request_body`]
    pub const ENCODE_REQUEST_BODY: &str = "core.encode_request_body";
    /// [`super::send`]
    pub const SEND: &str = "core.send";
    /// [`super::log_http_request`]
    pub const LOG_HTTP_REQUEST: &str = "core.log_http_request";
    /// [`super::log_http_response`]
    pub const LOG_HTTP_RESPONSE: &str = "core.log_http_response";
    /// [`super::response_decoder`]
    pub const RESPONSE_DECODER: &str = "core.response_decoder";
}

/// Default hook set: encode the payload, then send.
///
/// No unmarshal hook is included; providers add their own decoder.
#[must_use]
pub fn defaults() -> Hooks {
    let mut hooks = Hooks::default();
    hooks.build.push_back(encode_request_body());
    hooks.send.push_back(send());
    hooks
}

/// Build hook replacing the request's transport.
#[must_use]
pub fn with_http_client(client: Arc<dyn HttpClient>) -> Hook {
    Hook::from_fn(name::WITH_HTTP_CLIENT, move |request| {
        request.client = Arc::clone(&client);
        Ok(())
    })
}

/// Build hook setting (replacing) one header.
#[must_use]
pub fn with_request_header(header: HeaderName, value: HeaderValue) -> Hook {
    Hook::from_fn(name::WITH_REQUEST_HEADER, move |request| {
        request.http.headers.insert(header.clone(), value.clone());
        Ok(())
    })
}

/// Build hook setting the request log level.
#[must_use]
pub fn with_log_level(level: LogLevel) -> Hook {
    Hook::from_fn(name::WITH_LOG_LEVEL, move |request| {
        request.log_level = level;
        Ok(())
    })
}

/// Build hook adding HTTP Basic credentials.
#[must_use]
pub fn set_basic_auth(username: impl Into<String>, password: impl Into<String>) -> Hook {
    let credentials = STANDARD.encode(format!("{}:{}", username.into(), password.into()));
    Hook::from_fn(name::SET_BASIC_AUTH, move |request| {
        let mut value = header_value(AUTHORIZATION.as_str(), &format!("Basic {credentials}"))?;
        value.set_sensitive(true);
        request.http.headers.insert(AUTHORIZATION, value);
        Ok(())
    })
}

/// Build hook encoding [`Request::payload`] into the body.
///
/// Sets `Content-Type` only when no earlier hook chose one.
#[must_use]
pub fn encode_request_body() -> Hook {
    Hook::from_fn(name::ENCODE_REQUEST_BODY, |request| {
        let Some(payload) = request.payload.take() else {
            return Ok(());
        };

        let (body, content_type) = match payload {
            Payload::Json(value) => (
                serde_json::to_vec(&value).map_err(Error::Encode)?,
                Some("application/json"),
            ),
            Payload::Form(pairs) => (
                url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish()
                    .into_bytes(),
                Some("application/x-www-form-urlencoded"),
            ),
            Payload::Raw(bytes) => (bytes, None),
        };

        if let Some(content_type) = content_type {
            if !request.http.headers.contains_key(CONTENT_TYPE) {
                request
                    .http
                    .headers
                    .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
        }
        request.http.body = Some(body);
        Ok(())
    })
}

struct SendHandler;

#[async_trait]
impl Handler for SendHandler {
    async fn handle(&self, request: &mut Request) -> Result<(), Error> {
        let client = Arc::clone(&request.client);
        let outgoing = request.http.clone();
        let response = request.context.run(client.request(outgoing)).await??;

        tracing::debug!(status = %response.status, bytes = response.body.len(), "response received");
        request.response = Some(response);
        Ok(())
    }
}

/// Send hook issuing the transport call under the request context.
///
/// Hooks pushed in front of it see the outgoing request; hooks pushed
/// behind it see [`Request::response`].
#[must_use]
pub fn send() -> Hook {
    Hook::new(name::SEND, SendHandler)
}

/// Send hook logging the outgoing request. Push it to the front.
///
/// `Authorization` is redacted.
#[must_use]
pub fn log_http_request() -> Hook {
    Hook::from_fn(name::LOG_HTTP_REQUEST, |request| {
        if !request.log_level.is_enabled() {
            return Ok(());
        }

        let headers: Vec<String> = request
            .http
            .headers
            .iter()
            .map(|(name, value)| {
                if value.is_sensitive() || name == AUTHORIZATION {
                    format!("{name}: <redacted>")
                } else {
                    format!("{name}: {}", value.to_str().unwrap_or("<binary>"))
                }
            })
            .collect();

        if request.log_level == LogLevel::DebugWithBody {
            let body = request.http.body_lossy();
            tracing::debug!(method = %request.http.method, url = %request.http.url, ?headers, %body, "sending request");
        } else {
            tracing::debug!(method = %request.http.method, url = %request.http.url, ?headers, "sending request");
        }
        Ok(())
    })
}

/// Send hook logging the raw response. Push it to the back.
#[must_use]
pub fn log_http_response() -> Hook {
    Hook::from_fn(name::LOG_HTTP_RESPONSE, |request| {
        if !request.log_level.is_enabled() {
            return Ok(());
        }
        let Some(response) = &request.response else {
            return Ok(());
        };

        if request.log_level == LogLevel::DebugWithBody {
            let body = response.body_lossy();
            tracing::debug!(status = %response.status, %body, "received response");
        } else {
            tracing::debug!(status = %response.status, "received response");
        }
        Ok(())
    })
}

/// Unmarshal hook for providers whose errors look like
/// `{"errorCode": "...", "errorMessage": "..."}`.
///
/// Success status decodes the body into [`Request::data`]; any other
/// status becomes [`Error::Provider`].
#[must_use]
pub fn response_decoder() -> Hook {
    Hook::from_fn(name::RESPONSE_DECODER, |request| {
        let response = request.response.as_ref().ok_or(Error::MissingResponse)?;

        if !response.is_success() {
            let error: ProviderError = decode_json(response)?;
            return Err(Error::Provider(error));
        }

        let data = decode_body(response)?;
        request.data = Some(data);
        Ok(())
    })
}

/// Decodes a success body into a JSON value; an empty body is `null`.
///
/// # Errors
///
/// Returns [`Error::Decode`] for a non-empty body that is not JSON.
pub fn decode_body(response: &HttpResponse) -> Result<serde_json::Value, Error> {
    if response.is_blank() {
        return Ok(serde_json::Value::Null);
    }
    decode_json(response)
}

/// Decodes the response body into `T`.
///
/// # Errors
///
/// Returns [`Error::Decode`] carrying the response status.
pub fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, Error> {
    serde_json::from_slice(&response.body).map_err(|source| Error::Decode {
        status: response.status,
        source,
    })
}

/// Parses a header value, reporting the header name on failure.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] if `value` has bytes not allowed in
/// a header.
pub fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
