//! Daraja request and response bodies.
//!
//! Field names follow the Daraja API verbatim (including its spelling of
//! `RecieverIdentifierType` and `Occassion`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result codes Daraja returns in `ResponseCode` and `errorCode`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResponseCode {
    /// Request accepted for processing
    SuccessSubmission,
    /// Bearer token unknown or expired
    InvalidAccessToken,
    /// `Authorization` header malformed
    InvalidAuthHeader,
    /// Authentication scheme not supported
    InvalidAuthType,
    /// `grant_type` not `client_credentials`
    InvalidGrantType,
    /// Provider-side failure
    InternalServerError,
    /// Any code not listed above
    Other(String),
}

impl ResponseCode {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SuccessSubmission => "0",
            Self::InvalidAccessToken => "404.001.03",
            Self::InvalidAuthHeader => "404.001.04",
            Self::InvalidAuthType => "400.008.01",
            Self::InvalidGrantType => "400.008.02",
            Self::InternalServerError => "500.001.1001",
            Self::Other(code) => code,
        }
    }

    /// Returns true for [`ResponseCode::SuccessSubmission`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::SuccessSubmission)
    }
}

impl From<&str> for ResponseCode {
    fn from(code: &str) -> Self {
        match code {
            "0" => Self::SuccessSubmission,
            "404.001.03" => Self::InvalidAccessToken,
            "404.001.04" => Self::InvalidAuthHeader,
            "400.008.01" => Self::InvalidAuthType,
            "400.008.02" => Self::InvalidGrantType,
            "500.001.1001" => Self::InternalServerError,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ResponseCode {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<ResponseCode> for String {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseAuthorization {
    /// Bearer token
    pub access_token: String,
    /// Lifetime in seconds, as a string
    #[serde(default)]
    pub expires_in: String,
}

/// STK push (Lipa na M-Pesa Online) request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestC2BExpress {
    pub business_short_code: String,
    /// See [`super::password_encode`]
    pub password: String,
    /// `YYYYMMDDHHmmss`
    pub timestamp: String,
    pub transaction_type: String,
    pub amount: String,
    pub party_a: String,
    pub party_b: String,
    pub phone_number: String,
    #[serde(rename = "CallBackURL")]
    pub callback_url: String,
    pub account_reference: String,
    pub transaction_desc: String,
}

/// STK push acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseC2BExpress {
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
    pub response_code: ResponseCode,
    pub response_description: String,
    #[serde(default)]
    pub customer_message: String,
}

/// STK push status query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestC2BExpressQuery {
    pub business_short_code: String,
    pub password: String,
    pub timestamp: String,
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
}

/// STK push status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseC2BExpressQuery {
    pub response_code: ResponseCode,
    pub response_description: String,
    #[serde(rename = "MerchantRequestID")]
    pub merchant_request_id: String,
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub result_desc: String,
}

/// Reversal of a completed transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestReversal {
    pub initiator: String,
    pub security_credential: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    pub amount: String,
    pub receiver_party: String,
    pub reciever_identifier_type: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    pub remarks: String,
    pub occasion: String,
}

/// Business to customer payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestB2C {
    #[serde(rename = "OriginatorConversationID")]
    pub originator_conversation_id: String,
    pub initiator_name: String,
    pub security_credential: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    pub amount: String,
    pub party_a: String,
    pub party_b: String,
    pub remarks: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    pub occassion: String,
}

/// Business to business payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestB2B {
    pub initiator: String,
    pub security_credential: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    pub sender_identifier_type: String,
    pub reciever_identifier_type: String,
    pub amount: String,
    pub party_a: String,
    pub party_b: String,
    pub account_reference: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub requester: String,
    pub remarks: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
}

/// Status query for any transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestTransactionStatus {
    pub initiator: String,
    pub security_credential: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    #[serde(rename = "TransactionID", skip_serializing_if = "String::is_empty")]
    pub transaction_id: String,
    #[serde(
        rename = "OriginatorConversationID",
        skip_serializing_if = "String::is_empty"
    )]
    pub originator_conversation_id: String,
    pub party_a: String,
    pub identifier_type: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    pub remarks: String,
    pub occasion: String,
}

/// Account balance query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestBalance {
    pub initiator: String,
    pub security_credential: String,
    #[serde(rename = "CommandID")]
    pub command_id: String,
    pub party_a: String,
    pub identifier_type: String,
    pub remarks: String,
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    #[serde(rename = "ResultURL")]
    pub result_url: String,
}

/// Acknowledgement of an asynchronous request; the result arrives later
/// on the request's `ResultURL`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseAsync {
    #[serde(rename = "ConversationID", default)]
    pub conversation_id: String,
    #[serde(rename = "OriginatorConversationID", default)]
    pub originator_conversation_id: String,
    pub response_code: ResponseCode,
    pub response_description: String,
}

/// Reversal acknowledgement.
pub type ResponseReversal = ResponseAsync;
/// B2C acknowledgement.
pub type ResponseB2C = ResponseAsync;
/// B2B acknowledgement.
pub type ResponseB2B = ResponseAsync;
/// Transaction status acknowledgement.
pub type ResponseTransactionStatus = ResponseAsync;
/// Balance acknowledgement.
pub type ResponseBalance = ResponseAsync;

/// Organisation name lookup by short code or till number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestOrgInfoQuery {
    /// `4` for short codes, `2` for till numbers
    pub identifier_type: String,
    pub identifier: String,
}

/// Organisation lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseOrgInfoQuery {
    pub response_code: ResponseCode,
    #[serde(default)]
    pub response_desc: String,
    #[serde(default)]
    pub organization_name: String,
}
