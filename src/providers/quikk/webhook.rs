//! Quikk webhook dispatch.
//!
//! Quikk reports the final result of every asynchronous operation by
//! calling back with a JSON:API document. The document shape depends on
//! the operation that produced it, and the operation is known only to
//! the caller (usually from the callback URL), so it is passed in as a
//! [`WebhookKind`]. [`WebhookProcessor`] decodes the body into the
//! matching [`Webhook`] variant and reduces it to a [`PaymentOutcome`].

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::WebhookError;
use super::models::{
    WebhookAttributesCharge, WebhookAttributesPayout, WebhookAttributesTransactionSearch,
    WebhookAttributesTransfer, WebhookMeta, WebhookResult,
};

/// `meta.code` of a successful result.
pub const RESULT_CODE_SUCCESS: &str = "200";

/// Transaction type of an incoming payment in search results.
pub const TXN_TYPE_PAYIN: &str = "payin";

/// Charge webhook.
pub type ChargeWebhook = WebhookResult<WebhookAttributesCharge>;
/// Payout webhook.
pub type PayoutWebhook = WebhookResult<WebhookAttributesPayout>;
/// Transfer webhook.
pub type TransferWebhook = WebhookResult<WebhookAttributesTransfer>;
/// Transaction search webhook.
pub type TransactionSearchWebhook = WebhookResult<WebhookAttributesTransactionSearch>;

/// Operation a webhook reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookKind {
    /// Result of a charge
    Charge,
    /// Result of a payout
    Payout,
    /// Result of a transfer
    Transfer,
    /// Result of a transaction (or balance) search
    Search,
}

impl WebhookKind {
    /// Returns the operation name Quikk uses for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Charge => "charge",
            Self::Payout => "payout",
            Self::Transfer => "transfer",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for WebhookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookKind {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "charge" => Ok(Self::Charge),
            "payout" => Ok(Self::Payout),
            "transfer" => Ok(Self::Transfer),
            "search" => Ok(Self::Search),
            other => Err(WebhookError::UnknownKind(other.to_string())),
        }
    }
}

/// A decoded webhook, one variant per [`WebhookKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "webhook", rename_all = "lowercase")]
pub enum Webhook {
    /// Result of a charge
    Charge(ChargeWebhook),
    /// Result of a payout
    Payout(PayoutWebhook),
    /// Result of a transfer
    Transfer(TransferWebhook),
    /// Result of a balance or transaction search
    Search(TransactionSearchWebhook),
}

impl Webhook {
    /// Decodes `raw` as the shape `kind` requires.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Decode`] if the body is not that shape.
    pub fn decode(raw: &[u8], kind: WebhookKind) -> Result<Self, WebhookError> {
        let webhook = match kind {
            WebhookKind::Charge => Self::Charge(parse(raw, kind)?),
            WebhookKind::Payout => Self::Payout(parse(raw, kind)?),
            WebhookKind::Transfer => Self::Transfer(parse(raw, kind)?),
            WebhookKind::Search => Self::Search(parse(raw, kind)?),
        };
        Ok(webhook)
    }

    /// Returns the kind this webhook was decoded as.
    #[must_use]
    pub const fn kind(&self) -> WebhookKind {
        match self {
            Self::Charge(_) => WebhookKind::Charge,
            Self::Payout(_) => WebhookKind::Payout,
            Self::Transfer(_) => WebhookKind::Transfer,
            Self::Search(_) => WebhookKind::Search,
        }
    }

    /// Returns the result block, if present.
    #[must_use]
    pub const fn meta(&self) -> Option<&WebhookMeta> {
        match self {
            Self::Charge(w) => w.meta.as_ref(),
            Self::Payout(w) => w.meta.as_ref(),
            Self::Transfer(w) => w.meta.as_ref(),
            Self::Search(w) => w.meta.as_ref(),
        }
    }

    /// Returns the id the original request was acknowledged with, which
    /// correlates this webhook with the payment it settles.
    ///
    /// Charges carry it in `txn_charge_id`, payouts and transfers in
    /// `response_id`. Searches for incoming payments carry it in
    /// `resource_id` and all others in `response_id`.
    #[must_use]
    pub fn external_id(&self) -> &str {
        match self {
            Self::Charge(w) => &w.data.attributes.txn_charge_id,
            Self::Payout(w) => &w.data.attributes.response_id,
            Self::Transfer(w) => &w.data.attributes.response_id,
            Self::Search(w) => search_reference(&w.data.attributes),
        }
    }
}

fn parse<A: DeserializeOwned>(
    raw: &[u8],
    kind: WebhookKind,
) -> Result<WebhookResult<A>, WebhookError> {
    serde_json::from_slice(raw).map_err(|source| WebhookError::Decode { kind, source })
}

fn search_reference(attributes: &WebhookAttributesTransactionSearch) -> &str {
    if attributes.txn_type == TXN_TYPE_PAYIN {
        &attributes.resource_id
    } else {
        &attributes.response_id
    }
}

/// Normalized payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// The provider settled the payment
    Succeeded,
    /// The provider reported a non-success result code
    Failed,
}

/// What a webhook says about the payment it reports on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    /// Settlement status
    pub status: PaymentStatus,
    /// Provider transaction reference; unset for failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

impl PaymentOutcome {
    const fn failed() -> Self {
        Self {
            status: PaymentStatus::Failed,
            payment_reference: None,
        }
    }

    fn succeeded(reference: &str) -> Self {
        Self {
            status: PaymentStatus::Succeeded,
            payment_reference: Some(reference.to_string()),
        }
    }
}

/// Caller-owned record of pending payment changes.
///
/// [`WebhookProcessor::process_into`] writes an outcome into it; fields
/// a webhook says nothing about are left as they were.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentUpdate {
    /// Latest known status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// Latest known provider reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
}

impl PaymentUpdate {
    /// Writes `outcome` into this record.
    pub fn apply(&mut self, outcome: &PaymentOutcome) {
        self.status = Some(outcome.status);
        if let Some(reference) = &outcome.payment_reference {
            self.payment_reference = Some(reference.clone());
        }
    }
}

/// A dispatched webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Processed {
    /// The decoded webhook
    pub webhook: Webhook,
    /// `None` when the webhook was deliberately ignored
    pub outcome: Option<PaymentOutcome>,
}

/// Decodes webhooks and maps them to payment outcomes.
///
/// Charges, payouts and transfers fail when `meta` carries a non-success
/// code and succeed otherwise. Searches never fail a payment: a
/// non-success code ("not found") or an empty `txn_type` means the
/// webhook is ignored.
#[derive(Debug, Clone)]
pub struct WebhookProcessor {
    success_code: String,
}

impl Default for WebhookProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl WebhookProcessor {
    /// Creates a processor treating [`RESULT_CODE_SUCCESS`] as success.
    #[must_use]
    pub fn new() -> Self {
        Self {
            success_code: RESULT_CODE_SUCCESS.to_string(),
        }
    }

    /// Overrides the `meta.code` value that means success.
    #[must_use]
    pub fn with_success_code(mut self, code: impl Into<String>) -> Self {
        self.success_code = code.into();
        self
    }

    /// Decodes `raw` as `kind` and derives its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Decode`] if the body does not match `kind`.
    pub fn process(&self, raw: &[u8], kind: WebhookKind) -> Result<Processed, WebhookError> {
        let webhook = Webhook::decode(raw, kind)?;
        let outcome = self.outcome(&webhook);

        match &outcome {
            Some(outcome) => tracing::info!(
                %kind,
                external_id = webhook.external_id(),
                status = ?outcome.status,
                "webhook processed"
            ),
            None => tracing::warn!(
                %kind,
                external_id = webhook.external_id(),
                code = webhook.meta().map(|m| m.code.as_str()),
                "webhook ignored"
            ),
        }

        Ok(Processed { webhook, outcome })
    }

    /// Like [`WebhookProcessor::process`] with the kind given by name.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::UnknownKind`] for an unrecognized name, or
    /// [`WebhookError::Decode`].
    pub fn process_action(&self, raw: &[u8], action: &str) -> Result<Processed, WebhookError> {
        self.process(raw, action.parse()?)
    }

    /// Like [`WebhookProcessor::process`], then writes the outcome (if
    /// any) into `update`.
    ///
    /// # Errors
    ///
    /// See [`WebhookProcessor::process`]. `update` is untouched on error.
    pub fn process_into(
        &self,
        raw: &[u8],
        kind: WebhookKind,
        update: &mut PaymentUpdate,
    ) -> Result<Processed, WebhookError> {
        let processed = self.process(raw, kind)?;
        if let Some(outcome) = &processed.outcome {
            update.apply(outcome);
        }
        Ok(processed)
    }

    fn is_failure(&self, meta: Option<&WebhookMeta>) -> bool {
        meta.is_some_and(|m| m.code != self.success_code)
    }

    fn outcome(&self, webhook: &Webhook) -> Option<PaymentOutcome> {
        let (meta, txn_id) = match webhook {
            Webhook::Charge(w) => (w.meta.as_ref(), &w.data.attributes.txn_id),
            Webhook::Payout(w) => (w.meta.as_ref(), &w.data.attributes.txn_id),
            Webhook::Transfer(w) => (w.meta.as_ref(), &w.data.attributes.txn_id),
            Webhook::Search(w) => return self.search_outcome(w),
        };

        if self.is_failure(meta) {
            Some(PaymentOutcome::failed())
        } else {
            Some(PaymentOutcome::succeeded(txn_id))
        }
    }

    fn search_outcome(&self, search: &TransactionSearchWebhook) -> Option<PaymentOutcome> {
        if self.is_failure(search.meta.as_ref()) {
            return None;
        }

        let attributes = &search.data.attributes;
        if attributes.txn_type.is_empty() {
            return None;
        }

        Some(PaymentOutcome::succeeded(search_reference(attributes)))
    }
}
