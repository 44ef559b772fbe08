//! Client layer: orchestrates auth, signing, transport calls, and mapping
//! transport ↔ domain.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthError, TokenManager};
use crate::domain::{
    CheckoutRequestId, ConsumerKey, ConsumerSecret, PassKey, RegisterUrls, RegisterUrlsResponse,
    ShortCode, StkPush, StkPushResponse, StkQueryResponse, ValidationError,
};
use crate::sign::SignedFields;
use crate::transport;
use crate::transport::http::{HttpTransport, ReqwestTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Daraja environment, selecting the API base URL.
pub enum Environment {
    /// `https://sandbox.safaricom.co.ke` — development and testing.
    #[default]
    Sandbox,
    /// `https://api.safaricom.co.ke` — live, real-money transactions.
    Production,
}

impl Environment {
    /// API base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.safaricom.co.ke",
            Self::Production => "https://api.safaricom.co.ke",
        }
    }

    /// OAuth token generation endpoint.
    pub fn auth_url(self) -> String {
        format!(
            "{}/oauth/v1/generate?grant_type=client_credentials",
            self.base_url()
        )
    }

    /// STK push (Lipa Na M-Pesa Online) initiation endpoint.
    pub fn stk_push_url(self) -> String {
        format!("{}/mpesa/stkpush/v1/processrequest", self.base_url())
    }

    /// STK push status query endpoint.
    pub fn stk_query_url(self) -> String {
        format!("{}/mpesa/stkpushquery/v1/query", self.base_url())
    }

    /// C2B callback URL registration endpoint.
    pub fn c2b_register_url(self) -> String {
        format!("{}/mpesa/c2b/v1/registerurl", self.base_url())
    }
}

#[derive(Debug, Clone)]
/// Immutable credentials and settings for a Daraja merchant.
///
/// Create once and share; the client never mutates it.
pub struct Config {
    pub consumer_key: ConsumerKey,
    pub consumer_secret: ConsumerSecret,
    pub business_short_code: ShortCode,
    pub pass_key: PassKey,
    pub environment: Environment,
}

impl Config {
    /// Read the configuration from `MPESA_CONSUMER_KEY`,
    /// `MPESA_CONSUMER_SECRET`, `MPESA_SHORTCODE`, `MPESA_PASSKEY`, and
    /// `MPESA_ENVIRONMENT` (anything other than `PRODUCTION`, case
    /// insensitive, selects the sandbox).
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable lookup.
    pub fn from_env_with(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ValidationError> {
        fn require(
            lookup: &impl Fn(&str) -> Option<String>,
            name: &'static str,
        ) -> Result<String, ValidationError> {
            lookup(name).ok_or(ValidationError::Empty { field: name })
        }

        let environment = match lookup("MPESA_ENVIRONMENT") {
            Some(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Sandbox,
        };

        Ok(Self {
            consumer_key: ConsumerKey::new(require(&lookup, "MPESA_CONSUMER_KEY")?)?,
            consumer_secret: ConsumerSecret::new(require(&lookup, "MPESA_CONSUMER_SECRET")?)?,
            business_short_code: ShortCode::new(require(&lookup, "MPESA_SHORTCODE")?)?,
            pass_key: PassKey::new(require(&lookup, "MPESA_PASSKEY")?)?,
            environment,
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MpesaClient`].
///
/// Each failure category is a distinct variant so callers can tell bad
/// input, bad credentials, a gateway rejection, and an unreachable gateway
/// apart. The client performs no retries and no logging; both are caller
/// policy.
pub enum MpesaError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Access token acquisition failed; see [`AuthError`] for the cause.
    #[error("authentication failed: {0}")]
    Auth(#[source] AuthError),

    /// A business endpoint returned a non-2xx status. The raw body is
    /// preserved verbatim; Daraja embeds structured error codes there that
    /// this layer deliberately does not interpret.
    #[error("API call failed with HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport failure (DNS, TLS, timeout) on a business call.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn StdError + Send + Sync>),

    /// The HTTP layer reported success but the body could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone)]
/// Builder for [`MpesaClient`].
///
/// Use this when you need to customize the timeout, user-agent, or endpoint
/// URLs.
pub struct MpesaClientBuilder {
    config: Config,
    auth_endpoint: String,
    stk_push_endpoint: String,
    stk_query_endpoint: String,
    c2b_register_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MpesaClientBuilder {
    /// Create a builder with the endpoints of the configured environment and
    /// no timeout/user-agent override.
    pub fn new(config: Config) -> Self {
        let environment = config.environment;
        Self {
            config,
            auth_endpoint: environment.auth_url(),
            stk_push_endpoint: environment.stk_push_url(),
            stk_query_endpoint: environment.stk_query_url(),
            c2b_register_endpoint: environment.c2b_register_url(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the OAuth token endpoint URL.
    pub fn auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = endpoint.into();
        self
    }

    /// Override the STK push endpoint URL.
    pub fn stk_push_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.stk_push_endpoint = endpoint.into();
        self
    }

    /// Override the STK query endpoint URL.
    pub fn stk_query_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.stk_query_endpoint = endpoint.into();
        self
    }

    /// Override the C2B register URL endpoint.
    pub fn c2b_register_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.c2b_register_endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`MpesaClient`].
    pub fn build(self) -> Result<MpesaClient, MpesaError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| MpesaError::Network(Box::new(err)))?;
        let http: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport { client });

        let token_manager = Arc::new(TokenManager::new(
            &self.config.consumer_key,
            &self.config.consumer_secret,
            self.auth_endpoint,
            http.clone(),
        ));

        Ok(MpesaClient {
            config: self.config,
            stk_push_endpoint: self.stk_push_endpoint,
            stk_query_endpoint: self.stk_query_endpoint,
            c2b_register_endpoint: self.c2b_register_endpoint,
            token_manager,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level Daraja client.
///
/// This type orchestrates token caching, request signing, JSON encoding, and
/// response classification. Cloning is cheap and clones share the token
/// cache, so one instance's refresh serves all of them.
pub struct MpesaClient {
    config: Config,
    stk_push_endpoint: String,
    stk_query_endpoint: String,
    c2b_register_endpoint: String,
    token_manager: Arc<TokenManager>,
    http: Arc<dyn HttpTransport>,
}

impl MpesaClient {
    /// Create a client using the configured environment's endpoints.
    ///
    /// For more customization, use [`MpesaClient::builder`].
    pub fn new(config: Config) -> Self {
        let http: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport {
            client: reqwest::Client::new(),
        });
        let token_manager = Arc::new(TokenManager::new(
            &config.consumer_key,
            &config.consumer_secret,
            config.environment.auth_url(),
            http.clone(),
        ));
        Self {
            stk_push_endpoint: config.environment.stk_push_url(),
            stk_query_endpoint: config.environment.stk_query_url(),
            c2b_register_endpoint: config.environment.c2b_register_url(),
            config,
            token_manager,
            http,
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(config: Config) -> MpesaClientBuilder {
        MpesaClientBuilder::new(config)
    }

    /// Initiate an STK push (Lipa Na M-Pesa Online) payment.
    ///
    /// The configured short code, a freshly signed password/timestamp pair,
    /// and the canonical subscriber number are injected into the payload;
    /// the caller-supplied amount, reference, description, and callback URL
    /// pass through unchanged. The synchronous response only acknowledges
    /// the push — the final outcome arrives on the callback URL.
    pub async fn stk_push(&self, request: StkPush) -> Result<StkPushResponse, MpesaError> {
        let signed = SignedFields::generate(
            &self.config.business_short_code,
            &self.config.pass_key,
        );
        let body =
            transport::encode_stk_push(&request, &self.config.business_short_code, &signed)
                .map_err(|err| MpesaError::Parse(Box::new(err)))?;

        let body = self.execute(&self.stk_push_endpoint, body).await?;
        transport::decode_stk_push_response(&body)
            .map_err(|err| MpesaError::Parse(Box::new(err)))
    }

    /// Query the status of a previously initiated STK push.
    pub async fn query_stk_status(
        &self,
        checkout_request_id: &CheckoutRequestId,
    ) -> Result<StkQueryResponse, MpesaError> {
        let signed = SignedFields::generate(
            &self.config.business_short_code,
            &self.config.pass_key,
        );
        let body = transport::encode_stk_query(
            checkout_request_id,
            &self.config.business_short_code,
            &signed,
        )
        .map_err(|err| MpesaError::Parse(Box::new(err)))?;

        let body = self.execute(&self.stk_query_endpoint, body).await?;
        transport::decode_stk_query_response(&body)
            .map_err(|err| MpesaError::Parse(Box::new(err)))
    }

    /// Register the C2B confirmation and validation URLs for the configured
    /// short code. This endpoint is authenticated but not signed.
    pub async fn register_c2b_urls(
        &self,
        request: RegisterUrls,
    ) -> Result<RegisterUrlsResponse, MpesaError> {
        let body = transport::encode_register_urls(&request, &self.config.business_short_code)
            .map_err(|err| MpesaError::Parse(Box::new(err)))?;

        let body = self.execute(&self.c2b_register_endpoint, body).await?;
        transport::decode_register_urls_response(&body)
            .map_err(|err| MpesaError::Parse(Box::new(err)))
    }

    /// Shared path for authenticated POSTs: obtain a token, issue exactly
    /// one request, classify the outcome. Token refreshes are accounted for
    /// separately by the token manager.
    async fn execute(&self, url: &str, body: String) -> Result<String, MpesaError> {
        let token = self
            .token_manager
            .access_token()
            .await
            .map_err(MpesaError::Auth)?;
        let authorization = format!("Bearer {token}");

        let response = self
            .http
            .post_json(url, &authorization, body)
            .await
            .map_err(MpesaError::Network)?;

        if !response.is_success() {
            return Err(MpesaError::Api {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }
}
