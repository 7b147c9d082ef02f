//! Tanda client.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use urlencoding::encode;

use crate::auth::{Authenticator, TokenSource};
use crate::pipeline::{
    self, Context, Error, Hook, Hooks, Operation, Payload, ProviderError, Request, corehooks,
    execute,
};
use crate::providers::ClientConfig;

use super::models::{
    RequestPayment, ResponseAuthentication, ResponsePayment, ResponseTransactionStatus,
};

/// Sandbox host.
pub const SANDBOX_URL: &str = "https://tandaio-api-uats.tanda.co.ke";
/// Production host.
pub const PRODUCTION_URL: &str = "https://io-proxy-443.tanda.co.ke";

/// Timeout of the transport used for the token endpoint.
pub const AUTHENTICATION_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a token is reused. Tanda grants an hour.
pub const TOKEN_LIFETIME: Duration = Duration::from_secs(55 * 60);

/// Hook name of [`response_decoder`].
pub const RESPONSE_DECODER: &str = "tanda.response_decoder";

/// Endpoint paths.
pub mod endpoint {
    pub const AUTHENTICATION: &str = "/accounts/v1/oauth/token";

    /// Payment requests of organisation `org_id`.
    #[must_use]
    pub fn payments(org_id: &str) -> String {
        format!("/io/v3/organizations/{}/request", urlencoding::encode(org_id))
    }

    /// One payment request of organisation `org_id`.
    #[must_use]
    pub fn transaction_status(org_id: &str, tracking_id: &str) -> String {
        format!(
            "/io/v3/organizations/{}/requests/{}",
            urlencoding::encode(org_id),
            urlencoding::encode(tracking_id)
        )
    }
}

/// Operation names.
pub mod operation {
    pub const AUTHENTICATE: &str = "Authenticate";
    pub const PAYMENT: &str = "Payment";
    pub const TRANSACTION_STATUS: &str = "TransactionStatus";
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Unmarshal hook for Tanda responses.
///
/// A success body decodes into [`Request::data`]. Otherwise
/// `{"status": ..., "message": ...}` becomes [`Error::Provider`], with the
/// HTTP status standing in for whichever field is missing.
#[must_use]
pub fn response_decoder() -> Hook {
    Hook::from_fn(RESPONSE_DECODER, |request| {
        let response = request.response.as_ref().ok_or(Error::MissingResponse)?;

        if response.is_success() {
            request.data = Some(corehooks::decode_body(response)?);
            return Ok(());
        }

        let body: ErrorBody = corehooks::decode_json(response)?;
        let code = body
            .status
            .unwrap_or_else(|| response.status.as_str().to_string());
        let message = body.message.unwrap_or_else(|| {
            response
                .status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
        Err(Error::Provider(ProviderError::new(code, message)))
    })
}

/// Default hooks: encode the body, send, decode `{status, message}`.
#[must_use]
pub fn default_hooks() -> Hooks {
    let mut hooks = corehooks::defaults();
    hooks.unmarshal.push_back(response_decoder());
    hooks
}

/// Tanda API client.
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

    /// Adds bearer authentication with `client_id`/`secret` to every
    /// operation.
    #[must_use]
    pub fn with_credentials(mut self, client_id: &str, secret: &str) -> Self {
        let source = self.authentication_request(client_id, secret);
        let hook = Authenticator::new(source, TOKEN_LIFETIME).into_hook();
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

    /// Returns the token source for `client_id`/`secret`.
    #[must_use]
    pub fn authentication_request(&self, client_id: &str, secret: &str) -> AuthenticationRequest {
        AuthenticationRequest {
            config: self.auth_config.clone(),
            client_id: client_id.to_string(),
            secret: secret.to_string(),
        }
    }

    /// Builds a payment request for organisation `org_id`.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn payment_request(&self, org_id: &str, input: &RequestPayment) -> Result<Request, Error> {
        let op = Operation::post(operation::PAYMENT, endpoint::payments(org_id));
        Request::new(&self.config, op, &self.hooks, Some(Payload::json(input)?))
    }

    /// Submits a payment. Completion is reported to `callback_url`.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn payment(
        &self,
        context: Context,
        org_id: &str,
        input: &RequestPayment,
    ) -> Result<ResponsePayment, Error> {
        self.payment_request(org_id, input)?
            .with_context(context)
            .send_into()
            .await
    }

    /// Builds a status query for the payment tracked as `tracking_id`.
    ///
    /// # Errors
    ///
    /// See [`Request::new`].
    pub fn transaction_status_request(
        &self,
        org_id: &str,
        tracking_id: &str,
        short_code: &str,
    ) -> Result<Request, Error> {
        let path = format!(
            "{}?shortCode={}",
            endpoint::transaction_status(org_id, tracking_id),
            encode(short_code)
        );
        let op = Operation::get(operation::TRANSACTION_STATUS, path);
        Request::new(&self.config, op, &self.hooks, None)
    }

    /// Queries the status of a payment.
    ///
    /// # Errors
    ///
    /// Any pipeline error.
    pub async fn transaction_status(
        &self,
        context: Context,
        org_id: &str,
        tracking_id: &str,
        short_code: &str,
    ) -> Result<ResponseTransactionStatus, Error> {
        self.transaction_status_request(org_id, tracking_id, short_code)?
            .with_context(context)
            .send_into()
            .await
    }
}

/// Nested token call: a form-encoded client credentials grant.
#[derive(Clone)]
pub struct AuthenticationRequest {
    config: pipeline::Config,
    client_id: String,
    secret: String,
}

impl std::fmt::Debug for AuthenticationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationRequest")
            .field("endpoint", &self.config.endpoint)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl AuthenticationRequest {
    /// Hooks of the token call.
    #[must_use]
    pub fn hooks() -> Hooks {
        let mut hooks = corehooks::defaults();
        hooks.build.push_front(corehooks::with_request_header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        ));
        hooks.send.push_front(corehooks::log_http_request());
        hooks.unmarshal.push_back(response_decoder());
        hooks
    }

    fn form(&self) -> Payload {
        Payload::Form(vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("client_secret".to_string(), self.secret.clone()),
        ])
    }

    /// Calls the token endpoint and returns the full response.
    ///
    /// # Errors
    ///
    /// Any pipeline error; rejected credentials are [`Error::Provider`].
    pub async fn send(&self, context: &Context) -> Result<ResponseAuthentication, Error> {
        let op = Operation::post(operation::AUTHENTICATE, endpoint::AUTHENTICATION);
        execute(
            &self.config,
            op,
            &Self::hooks(),
            Some(self.form()),
            context.clone(),
        )
        .await
    }
}

#[async_trait]
impl TokenSource for AuthenticationRequest {
    async fn fetch_token(&self, context: &Context) -> Result<String, Error> {
        self.send(context).await.map(|response| response.access_token)
    }
}
