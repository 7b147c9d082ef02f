//! Quikk client.

use http::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::auth::Signer;
use crate::pipeline::{
    self, Context, Error, Hook, Hooks, Operation, Payload, ProviderError, Request, corehooks,
};
use crate::providers::ClientConfig;

use super::models::{
    Document, RequestAccountBalance, RequestCharge, RequestPayout, RequestTransactionStatus,
    RequestTransfer, ResponseDefault,
};

/// Sandbox host.
pub const SANDBOX_URL: &str = "https://tryapi.quikk.dev";
/// Production host.
pub const PRODUCTION_URL: &str = "https://api.quikk.dev";

/// Media type of every request and response body.
pub const JSON_API: &str = "application/vnd.api+json";

/// Hook name of [`response_decoder`].
pub const RESPONSE_DECODER: &str = "quikk.response_decoder";

/// Endpoint paths.
pub mod endpoint {
    pub const AUTH_CHECK: &str = "/v1/auth-check";
    pub const CHARGE: &str = "/v1/mpesa/charge";
    pub const PAYOUT: &str = "/v1/mpesa/payouts";
    pub const TRANSFER: &str = "/v1/mpesa/transfers";
    pub const BALANCE: &str = "/v1/mpesa/searches/balance";
    pub const TRANSACTION_SEARCH: &str = "/v1/mpesa/searches/transaction";
}

/// Operation names; also the webhook discriminators.
pub mod operation {
    pub const AUTH_CHECK: &str = "auth_check";
    pub const CHARGE: &str = "charge";
    pub const PAYOUT: &str = "payout";
    pub const TRANSFER: &str = "transfer";
    pub const BALANCE: &str = "balance";
    pub const TRANSACTION_SEARCH: &str = "transaction_search";
    /// Resource type shared by balance and transaction searches
    pub const SEARCH: &str = "search";
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDocument {
    #[serde(default)]
    errors: Vec<ErrorObject>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorObject {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Unmarshal hook for JSON:API responses.
///
/// A success body decodes into [`Request::data`]. Otherwise the first
/// entry of `errors` becomes [`Error::Provider`]: its `code` (or
/// `status`) and its `detail` (or `title`). An empty `errors` list falls
/// back to the HTTP status.
#[must_use]
pub fn response_decoder() -> Hook {
    Hook::from_fn(RESPONSE_DECODER, |request| {
        let response = request.response.as_ref().ok_or(Error::MissingResponse)?;

        if response.is_success() {
            request.data = Some(corehooks::decode_body(response)?);
            return Ok(());
        }

        let document: ErrorDocument = corehooks::decode_json(response)?;
        let first = document.errors.into_iter().next().unwrap_or_default();
        let code = first
            .code
            .or(first.status)
            .unwrap_or_else(|| response.status.as_str().to_string());
        let message = first.detail.or(first.title).unwrap_or_else(|| {
            response
                .status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
        Err(Error::Provider(ProviderError::new(code, message)))
    })
}

/// Default hooks: encode the body, send, decode JSON:API.
#[must_use]
pub fn default_hooks() -> Hooks {
    let mut hooks = corehooks::defaults();
    hooks.unmarshal.push_back(response_decoder());
    hooks
}

/// Quikk API client.
///
/// Requests are signed rather than bearer-authenticated; see
/// [`Client::with_signer`].
#[derive(Debug, Clone)]
pub struct Client {
    config: pipeline::Config,
    hooks: Hooks,
}

impl Client {
    /// Creates a client sending and accepting `application/vnd.api+json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if an HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let (config, mut hooks) = config.resolve(default_hooks)?;
        let media_type = HeaderValue::from_static(JSON_API);
        hooks
            .build
            .push_front(corehooks::with_request_header(ACCEPT, media_type.clone()));
        hooks
            .build
            .push_front(corehooks::with_request_header(CONTENT_TYPE, media_type));

        Ok(Self { config, hooks })
    }

    /// Signs every request with `signer`.
    ///
    /// The signing hook runs last in the build stage, after the body is
    /// final.
    #[must_use]
    pub fn with_signer<C: crate::time::Clock + 'static>(mut self, signer: Signer<C>) -> Self {
        self.hooks.build.push_back(signer.into_hook());
        self
    }

    /// Signs every request with `key`/`secret`.
    #[must_use]
    pub fn with_credentials(self, key: &str, secret: &str) -> Self {
        self.with_signer(Signer::new(key, secret))
    }

    /// Returns the hook set every request starts from.
    #[must_use]
    pub const fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Returns the hook set for modification.
    pub const fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    fn document_request<A: Serialize>(
        &self,
        operation: Operation,
        kind: &str,
        reference: &str,
        attributes: &A,
    ) -> Result<Request, Error> {
        let payload = Payload::json(&Document::new(reference, kind, attributes))?;
        Request::new(&self.config, operation, &self.hooks, Some(payload))
    }

    /// Builds a request checking that the credentials are accepted.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn verify_auth_request(&self) -> Result<Request, Error> {
        let op = Operation::get(operation::AUTH_CHECK, endpoint::AUTH_CHECK);
        Request::new(&self.config, op, &self.hooks, None)
    }

    /// Checks that the credentials are accepted and returns whatever the
    /// provider answered.
    ///
    /// # Errors
    ///
    /// Any pipeline error; rejected credentials are [`Error::Provider`].
    pub async fn verify_auth(&self, context: Context) -> Result<serde_json::Value, Error> {
        self.verify_auth_request()?.with_context(context).send().await
    }

    /// Builds a charge request; `reference` becomes the resource id.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn charge_request(&self, input: &RequestCharge, reference: &str) -> Result<Request, Error> {
        let op = Operation::post(operation::CHARGE, endpoint::CHARGE);
        self.document_request(op, operation::CHARGE, reference, input)
    }

    /// Charges a customer. The result arrives as a charge webhook.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn charge(
        &self,
        context: Context,
        input: &RequestCharge,
        reference: &str,
    ) -> Result<ResponseDefault, Error> {
        self.charge_request(input, reference)?
            .with_context(context)
            .send_into()
            .await
    }

    /// Builds a payout request.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn payout_request(&self, input: &RequestPayout, reference: &str) -> Result<Request, Error> {
        let op = Operation::post(operation::PAYOUT, endpoint::PAYOUT);
        self.document_request(op, operation::PAYOUT, reference, input)
    }

    /// Pays out to a customer. The result arrives as a payout webhook.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn payout(
        &self,
        context: Context,
        input: &RequestPayout,
        reference: &str,
    ) -> Result<ResponseDefault, Error> {
        self.payout_request(input, reference)?
            .with_context(context)
            .send_into()
            .await
    }

    /// Builds a transfer request.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn transfer_request(
        &self,
        input: &RequestTransfer,
        reference: &str,
    ) -> Result<Request, Error> {
        let op = Operation::post(operation::TRANSFER, endpoint::TRANSFER);
        self.document_request(op, operation::TRANSFER, reference, input)
    }

    /// Transfers to another business. The result arrives as a transfer
    /// webhook.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn transfer(
        &self,
        context: Context,
        input: &RequestTransfer,
        reference: &str,
    ) -> Result<ResponseDefault, Error> {
        self.transfer_request(input, reference)?
            .with_context(context)
            .send_into()
            .await
    }

    /// Builds a balance search.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn balance_request(
        &self,
        input: &RequestAccountBalance,
        reference: &str,
    ) -> Result<Request, Error> {
        let op = Operation::post(operation::BALANCE, endpoint::BALANCE);
        self.document_request(op, operation::SEARCH, reference, input)
    }

    /// Searches for an account balance. The result arrives as a search
    /// webhook.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn balance(
        &self,
        context: Context,
        input: &RequestAccountBalance,
        reference: &str,
    ) -> Result<ResponseDefault, Error> {
        self.balance_request(input, reference)?
            .with_context(context)
            .send_into()
            .await
    }

    /// Builds a transaction search.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn transaction_search_request(
        &self,
        input: &RequestTransactionStatus,
        reference: &str,
    ) -> Result<Request, Error> {
        let op = Operation::post(operation::TRANSACTION_SEARCH, endpoint::TRANSACTION_SEARCH);
        self.document_request(op, operation::SEARCH, reference, input)
    }

    /// Searches for a transaction. The result arrives as a search webhook.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn transaction_search(
        &self,
        context: Context,
        input: &RequestTransactionStatus,
        reference: &str,
    ) -> Result<ResponseDefault, Error> {
        self.transaction_search_request(input, reference)?
            .with_context(context)
            .send_into()
            .await
    }
}
