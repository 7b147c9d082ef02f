//! HMAC-SHA256 request signing over the `Date` header.

use std::time::SystemTime;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use http::header::{AUTHORIZATION, DATE};
use sha2::Sha256;

use crate::pipeline::corehooks::header_value;
use crate::pipeline::{Error, Hook, Request};
use crate::time::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

/// Hook name of [`Signer::into_hook`].
pub const SIGN: &str = "auth.sign";

/// Formats `time` the way HTTP `Date` headers are written
/// (`Mon, 02 Jan 2006 15:04:05 GMT`).
#[must_use]
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Signs requests with a shared key id and secret.
///
/// The signed string is `date: <Date header>`. The signature is the
/// base64 of its HMAC-SHA256, percent-encoded so it can travel inside a
/// quoted header parameter.
#[derive(Clone)]
pub struct Signer<C = SystemClock> {
    key: String,
    secret: Vec<u8>,
    clock: C,
}

impl<C> std::fmt::Debug for Signer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl Signer<SystemClock> {
    /// Creates a signer stamping requests with the system time.
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.into(),
            secret: secret.as_ref().to_vec(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> Signer<C> {
    /// Replaces the clock used for the `Date` header.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Signer<C2> {
        Signer {
            key: self.key,
            secret: self.secret,
            clock,
        }
    }

    /// Returns the key id.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Computes the URL-safe signature for a `Date` header value.
    #[must_use]
    pub fn signature(&self, date: &str) -> String {
        // HMAC hashes long keys and pads short ones, so no length is rejected.
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length");
        mac.update(format!("date: {date}").as_bytes());
        let digest = STANDARD.encode(mac.finalize().into_bytes());
        urlencoding::encode(&digest).into_owned()
    }

    /// Returns the full `Authorization` header value for `date`.
    #[must_use]
    pub fn authorization(&self, date: &str) -> String {
        format!(
            r#"keyId="{}",algorithm="hmac-sha256",headers="date",signature="{}""#,
            self.key,
            self.signature(date)
        )
    }

    /// Stamps `request` with a `Date` header and its signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeader`] if the key id cannot be carried in
    /// a header.
    pub fn sign(&self, request: &mut Request) -> Result<(), Error> {
        let date = http_date(self.clock.now());
        let mut authorization = header_value(AUTHORIZATION.as_str(), &self.authorization(&date))?;
        authorization.set_sensitive(true);

        request
            .http
            .headers
            .insert(DATE, header_value(DATE.as_str(), &date)?);
        request.http.headers.insert(AUTHORIZATION, authorization);
        Ok(())
    }
}

impl<C: Clock + 'static> Signer<C> {
    /// Wraps the signer in a build hook.
    #[must_use]
    pub fn into_hook(self) -> Hook {
        Hook::from_fn(SIGN, move |request| self.sign(request))
    }
}
