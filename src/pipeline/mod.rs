//! Staged, hook-extensible request execution.
//!
//! Every provider call is a [`Request`] that goes through three stages:
//!
//! 1. **Build** – hooks mutate the outgoing request (headers, body,
//!    credentials).
//! 2. **Send** – hooks observe the outgoing request, perform the transport
//!    call ([`corehooks::send`]) and observe the raw response.
//! 3. **Unmarshal** – hooks turn the response into output or an error.
//!
//! Stages run strictly in that order and hooks within a stage run in
//! list order. The first error stops everything.
//!
//! The executor knows nothing about providers: a client differs from
//! another only in the [`Operation`]s and [`Hooks`] it supplies.

mod context;
pub mod corehooks;
mod error;
mod hooks;
mod operation;
mod request;

#[cfg(test)]
mod corehooks_tests;
#[cfg(test)]
pub(crate) mod test_support;

pub use context::Context;
pub use error::{Error, ProviderError};
pub use hooks::{Handler, Hook, HookList, Hooks, Stage};
pub use operation::Operation;
pub use request::{Config, LogLevel, Payload, Request, execute};
