//! Payments: HTTP client SDKs for mobile-money payment gateways.
//!
//! Every provider call runs through a staged, hook-extensible
//! [`pipeline`]: build hooks shape the request, send hooks perform the
//! transport call, unmarshal hooks decode the answer. Providers differ
//! only in the operations and hooks they supply:
//!
//! - [`providers::daraja`]: Safaricom M-Pesa, bearer tokens from HTTP
//!   Basic credentials
//! - [`providers::quikk`]: JSON:API requests signed with HMAC-SHA256,
//!   plus the webhook dispatcher
//! - [`providers::tanda`]: bearer tokens from a form-encoded grant
//!
//! Token caching and request signing live in [`auth`].

pub mod auth;
pub mod config;
pub mod pipeline;
pub mod providers;
pub mod time;
pub mod transport;
