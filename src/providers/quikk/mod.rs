//! Quikk API and its webhooks.
//!
//! Requests are JSON:API documents signed with HMAC-SHA256 over the
//! `Date` header. Business operations are acknowledged synchronously and
//! settled later by a webhook, which [`WebhookProcessor`] turns into a
//! [`PaymentOutcome`].

mod client;
mod error;
mod models;
pub mod webhook;


pub use client::{
    Client, JSON_API, PRODUCTION_URL, RESPONSE_DECODER, SANDBOX_URL, default_hooks, endpoint,
    operation, response_decoder,
};
pub use error::WebhookError;
pub use models::*;
pub use webhook::{
    ChargeWebhook, PaymentOutcome, PaymentStatus, PaymentUpdate, PayoutWebhook, Processed,
    RESULT_CODE_SUCCESS, TXN_TYPE_PAYIN, TransactionSearchWebhook, TransferWebhook, Webhook,
    WebhookKind, WebhookProcessor,
};
