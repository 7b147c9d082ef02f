//! Tanda payments API.
//!
//! Operations are scoped to an organisation id and authenticate with a
//! bearer token from a form-encoded client credentials grant. Call
//! [`Client::with_credentials`] to have every request carry one.

mod client;
mod models;


pub use client::{
    AUTHENTICATION_TIMEOUT, AuthenticationRequest, Client, PRODUCTION_URL, RESPONSE_DECODER,
    SANDBOX_URL, TOKEN_LIFETIME, default_hooks, endpoint, operation, response_decoder,
};
pub use models::*;
