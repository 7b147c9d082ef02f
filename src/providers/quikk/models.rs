//! Quikk JSON:API documents.
//!
//! Every request and response body is a single resource wrapped as
//! `{"data": {"id": ..., "type": ..., "attributes": {...}}}`. Webhooks
//! use the same envelope plus an optional `meta` result block.

use serde::{Deserialize, Serialize};

/// A JSON:API resource object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource<A> {
    /// Caller-chosen reference on requests, provider id on responses
    #[serde(default)]
    pub id: String,
    /// Resource type (`charge`, `payout`, `transfer`, `search`)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Operation-specific fields
    pub attributes: A,
}

/// A JSON:API document holding one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document<A> {
    pub data: Resource<A>,
}

impl<A> Document<A> {
    /// Wraps `attributes` in a resource of type `kind` with id `id`.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>, attributes: A) -> Self {
        Self {
            data: Resource {
                id: id.into(),
                kind: kind.into(),
                attributes,
            },
        }
    }
}

/// Customer-initiated (STK push) charge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestCharge {
    pub amount: u64,
    pub customer_no: String,
    pub reference: String,
    /// Usually `msisdn`
    pub customer_type: String,
    pub short_code: String,
    /// RFC 3339 timestamp
    pub posted_at: String,
}

/// Business to customer payout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestPayout {
    pub amount: u64,
    pub recipient_no: String,
    pub recipient_type: String,
    pub short_code: String,
    pub posted_at: String,
}

/// Business to business transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestTransfer {
    pub amount: u64,
    pub recipient_no: String,
    pub recipient_type: String,
    pub recipient_category: String,
    pub short_code: String,
    pub posted_at: String,
}

/// Account balance search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestAccountBalance {
    pub short_code: String,
    pub posted_at: String,
}

/// Transaction search by an id field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestTransactionStatus {
    pub short_code: String,
    /// Value searched for
    pub q: String,
    /// Field searched on, e.g. `txn_id` or `resource_id`
    pub on: String,
}

/// Attributes of a synchronous acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseAttributes {
    /// Id the final webhook will refer back to
    #[serde(default)]
    pub resource_id: String,
    /// Everything else the provider sent
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of every Quikk business operation.
pub type ResponseDefault = Document<ResponseAttributes>;

/// Result block of a webhook; absent on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMeta {
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A webhook: one resource plus an optional result block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResult<A> {
    pub data: Resource<A>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<WebhookMeta>,
}

/// Attributes of a charge webhook.
///
/// Both ids are required; a body without them is not a charge webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAttributesCharge {
    pub txn_id: String,
    /// Id returned by the charge request
    pub txn_charge_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Attributes of a payout webhook. `txn_id` and `response_id` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAttributesPayout {
    pub txn_id: String,
    /// Id returned by the payout request
    pub response_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Attributes of a transfer webhook. `txn_id` and `response_id` are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAttributesTransfer {
    pub txn_id: String,
    /// Id returned by the transfer request
    pub response_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Attributes of a transaction search webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookAttributesTransactionSearch {
    pub txn_id: String,
    /// `payin`, `payout` or empty for an incomplete result
    pub txn_type: String,
    pub resource_id: String,
    pub response_id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
