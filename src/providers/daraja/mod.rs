//! Safaricom Daraja (M-Pesa) API.
//!
//! Operations authenticate with a bearer token obtained from
//! `/oauth/v1/generate` using HTTP Basic credentials. Call
//! [`Client::with_credentials`] to have every request carry one; the
//! token is cached and reused until shortly before Daraja expires it.

mod client;
mod models;

#[cfg(test)]
mod models_tests;

pub use client::{
    AUTHENTICATION_TIMEOUT, AuthenticationRequest, Client, PRODUCTION_URL, SANDBOX_URL,
    TOKEN_LIFETIME, default_hooks, endpoint, operation, password_encode,
};
pub use models::*;
