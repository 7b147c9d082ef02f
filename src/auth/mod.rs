//! Credential hooks: cached bearer tokens and HMAC request signing.
//!
//! [`Authenticator`] fetches a token through a [`TokenSource`] on a cache
//! miss and injects it as `Authorization: Bearer <token>`. [`Signer`]
//! stamps each request with a `Date` header and an HMAC signature over it.
//! Both are build hooks and slot into any client's
//! [`Hooks`](crate::pipeline::Hooks).

mod authenticator;
mod cache;
mod signer;

#[cfg(test)]
mod signer_tests;

pub use authenticator::{AUTHENTICATE, Authenticator, TokenSource};
pub use cache::TtlCache;
pub use signer::{SIGN, Signer, http_date};
