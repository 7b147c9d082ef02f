//! Daraja (Safaricom M-Pesa) client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{Authenticator, TokenSource};
use crate::pipeline::{
    self, Context, Error, Hooks, Operation, Payload, Request, corehooks, execute,
};
use crate::providers::ClientConfig;

use super::models::{
    RequestB2B, RequestB2C, RequestBalance, RequestC2BExpress, RequestC2BExpressQuery,
    RequestOrgInfoQuery, RequestReversal, RequestTransactionStatus, ResponseAuthorization,
    ResponseB2B, ResponseB2C, ResponseBalance, ResponseC2BExpress, ResponseC2BExpressQuery,
    ResponseOrgInfoQuery, ResponseReversal, ResponseTransactionStatus,
};

/// Sandbox host.
pub const SANDBOX_URL: &str = "https://sandbox.safaricom.co.ke";
/// Production host.
pub const PRODUCTION_URL: &str = "https://api.safaricom.co.ke";

/// Timeout of the transport used for the token endpoint.
pub const AUTHENTICATION_TIMEOUT: Duration = Duration::from_secs(40);

/// How long a token is reused. Daraja grants an hour.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(55 * 60);

/// Endpoint paths.
pub mod endpoint {
    pub const AUTHENTICATION: &str = "/oauth/v1/generate";
    pub const C2B_EXPRESS: &str = "/mpesa/stkpush/v1/processrequest";
    pub const C2B_EXPRESS_QUERY: &str = "/mpesa/stkpushquery/v1/query";
    pub const REVERSAL: &str = "/mpesa/reversal/v1/request";
    pub const B2C_PAYMENT: &str = "/mpesa/b2c/v1/paymentrequest";
    pub const B2B_PAYMENT: &str = "/mpesa/b2b/v1/paymentrequest";
    pub const TRANSACTION_STATUS: &str = "/mpesa/transactionstatus/v1/query";
    pub const ACCOUNT_BALANCE: &str = "/mpesa/accountbalance/v1/query";
    pub const QUERY_ORG_INFO: &str = "/sfcverify/v1/query/info";
}

/// Operation names.
pub mod operation {
    pub const AUTHENTICATE: &str = "Authenticate";
    pub const C2B_EXPRESS: &str = "C2BExpress";
    pub const C2B_QUERY: &str = "C2BQuery";
    pub const REVERSAL: &str = "Reversal";
    pub const B2C: &str = "B2C";
    pub const B2B: &str = "B2B";
    pub const TRANSACTION_STATUS: &str = "TransactionStatus";
    pub const BALANCE: &str = "Balance";
    pub const QUERY_ORG_INFO: &str = "QueryOrgInfo";
}

/// Default hooks: encode the body, send, decode `{errorCode, errorMessage}`.
#[must_use]
pub fn default_hooks() -> Hooks {
    let mut hooks = corehooks::defaults();
    hooks.unmarshal.push_back(corehooks::response_decoder());
    hooks
}

/// STK push password: `base64(shortcode + passkey + timestamp)`.
#[must_use]
pub fn password_encode(shortcode: &str, passkey: &str, timestamp: &str) -> String {
    STANDARD.encode(format!("{shortcode}{passkey}{timestamp}"))
}

/// Daraja API client.
#[derive(Debug, Clone)]
pub struct Client {
    config: pipeline::Config,
    auth_config: pipeline::Config,
    hooks: Hooks,
}

impl Client {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if an HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let (request_config, hooks) = config.resolve(default_hooks)?;
        let auth_config = pipeline::Config {
            endpoint: config.endpoint.clone(),
            client: Some(config.transport(AUTHENTICATION_TIMEOUT)?),
            log_level: config.log_level,
        };

        Ok(Self {
            config: request_config,
            auth_config,
            hooks,
        })
    }

    /// Adds bearer authentication with `key`/`secret` to every operation.
    #[must_use]
    pub fn with_credentials(mut self, key: &str, secret: &str) -> Self {
        let hook = Authenticator::new(self.authentication_request(key, secret), TOKEN_LIFETIME)
            .into_hook();
        self.hooks.build.push_back(hook);
        self
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

    /// Returns the token source for `key`/`secret`.
    ///
    /// It runs on its own transport with a longer timeout and its own
    /// hooks: basic auth, request logging and the error decoder.
    #[must_use]
    pub fn authentication_request(&self, key: &str, secret: &str) -> AuthenticationRequest {
        AuthenticationRequest {
            config: self.auth_config.clone(),
            key: key.to_string(),
            secret: secret.to_string(),
        }
    }

    fn request<I: Serialize>(&self, operation: Operation, input: &I) -> Result<Request, Error> {
        let payload = Payload::json(input)?;
        Request::new(&self.config, operation, &self.hooks, Some(payload))
    }

    async fn call<O: DeserializeOwned>(
        request: Result<Request, Error>,
        context: Context,
    ) -> Result<O, Error> {
        request?.with_context(context).send_into().await
    }

    /// Builds an STK push request.
    ///
    /// Per-call hooks can be added with [`Request::with_options`].
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn c2b_express_request(&self, input: &RequestC2BExpress) -> Result<Request, Error> {
        let op = Operation::post(operation::C2B_EXPRESS, endpoint::C2B_EXPRESS);
        self.request(op, input)
    }

    /// Initiates an STK push.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn c2b_express(
        &self,
        context: Context,
        input: &RequestC2BExpress,
    ) -> Result<ResponseC2BExpress, Error> {
        Self::call(self.c2b_express_request(input), context).await
    }

    /// Builds an STK push status query.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn c2b_query_request(&self, input: &RequestC2BExpressQuery) -> Result<Request, Error> {
        let op = Operation::post(operation::C2B_QUERY, endpoint::C2B_EXPRESS_QUERY);
        self.request(op, input)
    }

    /// Queries the status of an STK push.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn c2b_query(
        &self,
        context: Context,
        input: &RequestC2BExpressQuery,
    ) -> Result<ResponseC2BExpressQuery, Error> {
        Self::call(self.c2b_query_request(input), context).await
    }

    /// Builds a reversal request.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn reversal_request(&self, input: &RequestReversal) -> Result<Request, Error> {
        let op = Operation::post(operation::REVERSAL, endpoint::REVERSAL);
        self.request(op, input)
    }

    /// Reverses a transaction.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn reversal(
        &self,
        context: Context,
        input: &RequestReversal,
    ) -> Result<ResponseReversal, Error> {
        Self::call(self.reversal_request(input), context).await
    }

    /// Builds a business to customer payment request.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn b2c_request(&self, input: &RequestB2C) -> Result<Request, Error> {
        let op = Operation::post(operation::B2C, endpoint::B2C_PAYMENT);
        self.request(op, input)
    }

    /// Pays a customer.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn b2c(&self, context: Context, input: &RequestB2C) -> Result<ResponseB2C, Error> {
        Self::call(self.b2c_request(input), context).await
    }

    /// Builds a business to business payment request.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn b2b_request(&self, input: &RequestB2B) -> Result<Request, Error> {
        let op = Operation::post(operation::B2B, endpoint::B2B_PAYMENT);
        self.request(op, input)
    }

    /// Pays another business.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn b2b(&self, context: Context, input: &RequestB2B) -> Result<ResponseB2B, Error> {
        Self::call(self.b2b_request(input), context).await
    }

    /// Builds a transaction status query.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn transaction_status_request(
        &self,
        input: &RequestTransactionStatus,
    ) -> Result<Request, Error> {
        let op = Operation::post(operation::TRANSACTION_STATUS, endpoint::TRANSACTION_STATUS);
        self.request(op, input)
    }

    /// Queries the status of a transaction.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn transaction_status(
        &self,
        context: Context,
        input: &RequestTransactionStatus,
    ) -> Result<ResponseTransactionStatus, Error> {
        Self::call(self.transaction_status_request(input), context).await
    }

    /// Builds an account balance query.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn balance_request(&self, input: &RequestBalance) -> Result<Request, Error> {
        let op = Operation::post(operation::BALANCE, endpoint::ACCOUNT_BALANCE);
        self.request(op, input)
    }

    /// Queries an account balance.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn balance(
        &self,
        context: Context,
        input: &RequestBalance,
    ) -> Result<ResponseBalance, Error> {
        Self::call(self.balance_request(input), context).await
    }

    /// Builds an organisation lookup.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn query_org_info_request(&self, input: &RequestOrgInfoQuery) -> Result<Request, Error> {
        let op = Operation::post(operation::QUERY_ORG_INFO, endpoint::QUERY_ORG_INFO);
        self.request(op, input)
    }

    /// Looks up the organisation behind a short code or till.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn query_org_info(
        &self,
        context: Context,
        input: &RequestOrgInfoQuery,
    ) -> Result<ResponseOrgInfoQuery, Error> {
        Self::call(self.query_org_info_request(input), context).await
    }
}

/// Nested token call against `/oauth/v1/generate`.
#[derive(Clone)]
pub struct AuthenticationRequest {
    config: pipeline::Config,
    key: String,
    secret: String,
}

impl std::fmt::Debug for AuthenticationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationRequest")
            .field("endpoint", &self.config.endpoint)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl AuthenticationRequest {
    /// Hooks of the token call.
    #[must_use]
    pub fn hooks(&self) -> Hooks {
        let mut hooks = corehooks::defaults();
        hooks
            .build
            .push_back(corehooks::set_basic_auth(&self.key, &self.secret));
        hooks.send.push_front(corehooks::log_http_request());
        hooks.unmarshal.push_back(corehooks::response_decoder());
        hooks
    }

    /// Calls the token endpoint and returns the full response.
    ///
    /// # Errors
    ///
    /// Any pipeline error; a rejected key/secret is [`Error::Provider`].
    pub async fn send(&self, context: &Context) -> Result<ResponseAuthorization, Error> {
        let op = Operation::get(
            operation::AUTHENTICATE,
            format!("{}?grant_type=client_credentials", endpoint::AUTHENTICATION),
        );
        execute(&self.config, op, &self.hooks(), None, context.clone()).await
    }
}

#[async_trait]
impl TokenSource for AuthenticationRequest {
    async fn fetch_token(&self, context: &Context) -> Result<String, Error> {
        self.send(context).await.map(|response| response.access_token)
    }
}
