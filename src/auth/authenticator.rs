//! Bearer-token build hook backed by a [`TtlCache`].

use std::time::Duration;

use async_trait::async_trait;
use http::header::AUTHORIZATION;

use crate::pipeline::corehooks::header_value;
use crate::pipeline::{Context, Error, Handler, Hook, Request};
use crate::time::{Clock, SystemClock};

use super::TtlCache;

/// Hook name of [`Authenticator::into_hook`].
pub const AUTHENTICATE: &str = "auth.authenticate";

/// Something that can obtain a fresh access token.
///
/// Implementations usually run a nested pipeline request against the
/// provider's token endpoint.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Performs one authentication call.
    ///
    /// # Errors
    ///
    /// Any pipeline error from the nested call.
    async fn fetch_token(&self, context: &Context) -> Result<String, Error>;
}

/// Build hook injecting `Authorization: Bearer <token>`.
///
/// The token is fetched from a [`TokenSource`] on a cache miss and then
/// reused until `lifetime` has passed. The lifetime should be shorter
/// than what the provider grants so that a token is never served after
/// the provider has already expired it.
///
/// Concurrent misses are collapsed: one caller authenticates while the
/// others wait and then read the refreshed cache.
#[derive(Debug)]
pub struct Authenticator<S, C = SystemClock> {
    source: S,
    cache: TtlCache<String, C>,
    lifetime: Duration,
    refresh: tokio::sync::Mutex<()>,
}

impl<S: TokenSource> Authenticator<S, SystemClock> {
    /// Creates an authenticator caching tokens for `lifetime`.
    #[must_use]
    pub fn new(source: S, lifetime: Duration) -> Self {
        Self::with_clock(source, lifetime, SystemClock)
    }
}

impl<S: TokenSource, C: Clock> Authenticator<S, C> {
    /// Creates an authenticator whose expiry reads `clock`.
    #[must_use]
    pub fn with_clock(source: S, lifetime: Duration, clock: C) -> Self {
        Self {
            source,
            cache: TtlCache::with_clock(clock),
            lifetime,
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns the cached token, authenticating first if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] wrapping the nested call's error,
    /// or [`Error::Cancelled`]/[`Error::DeadlineExceeded`] if `context`
    /// finished first.
    pub async fn token(&self, context: &Context) -> Result<String, Error> {
        if let Some(token) = self.cache.get() {
            return Ok(token);
        }

        let _guard = context.run(self.refresh.lock()).await?;
        // Another caller may have refreshed while this one waited.
        if let Some(token) = self.cache.get() {
            return Ok(token);
        }

        tracing::info!("access token missing or expired, authenticating");
        let token = self
            .source
            .fetch_token(context)
            .await
            .map_err(|e| match e {
                Error::Cancelled | Error::DeadlineExceeded => e,
                other => Error::Authentication(Box::new(other)),
            })?;

        let expires_at = self.cache.clock().now() + self.lifetime;
        self.cache.set(token.clone(), expires_at);
        tracing::debug!(lifetime_secs = self.lifetime.as_secs(), "access token cached");

        Ok(token)
    }

    /// Drops the cached token so the next call authenticates again.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

impl<S, C> Authenticator<S, C>
where
    S: TokenSource + 'static,
    C: Clock + 'static,
{
    /// Wraps the authenticator in a build hook.
    #[must_use]
    pub fn into_hook(self) -> Hook {
        Hook::new(AUTHENTICATE, self)
    }
}

#[async_trait]
impl<S: TokenSource, C: Clock> Handler for Authenticator<S, C> {
    async fn handle(&self, request: &mut Request) -> Result<(), Error> {
        let token = self.token(&request.context).await?;

        let mut value = header_value(AUTHORIZATION.as_str(), &format!("Bearer {token}"))?;
        value.set_sensitive(true);
        request.http.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
