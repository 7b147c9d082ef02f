//! Tanda request and response bodies.

use serde::{Deserialize, Serialize};

/// Token endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseAuthentication {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Seconds until expiry
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

/// A named value in a payment's request, reference or result parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl Parameter {
    /// Creates a parameter without a label.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            label: String::new(),
        }
    }
}

/// Payment request, e.g. a mobile money collection or disbursement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayment {
    /// What to do, e.g. `CustomerToMerchantMobileMoneyPayment`
    pub command_id: String,
    /// Mobile network, e.g. `MPESA`
    pub service_provider_id: String,
    pub request_parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_parameters: Vec<Parameter>,
    pub reference: String,
    pub callback_url: String,
}

/// Acknowledgement of a payment request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsePayment {
    /// Tracking id used to query the transaction later
    pub id: String,
    pub status: String,
    pub message: String,
    pub reference: String,
    pub timestamp: String,
    pub command_id: String,
    pub request_parameters: Vec<Parameter>,
    pub reference_parameters: Vec<Parameter>,
}

/// Current state of a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseTransactionStatus {
    pub id: String,
    /// `000000` once the payment completed
    pub status: String,
    pub message: String,
    pub reference: String,
    pub receipt_number: String,
    pub timestamp: String,
    pub transaction_ref: String,
    pub result_parameters: Vec<Parameter>,
}
