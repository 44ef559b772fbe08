//! Token acquisition and caching for the Daraja OAuth endpoint.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::Mutex;

use crate::domain::{ConsumerKey, ConsumerSecret};
use crate::transport::http::HttpTransport;
use crate::transport::token::decode_access_token;

/// Subtracted from the advertised token lifetime so a token is never used
/// right at the gateway's own expiry boundary.
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
/// Failure acquiring an access token.
///
/// Distinct from the business-call errors so callers can tell bad
/// credentials apart from an unreachable gateway.
pub enum AuthError {
    /// Token endpoint returned a non-2xx status.
    #[error("token endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport failure (DNS, TLS, timeout) while contacting the token
    /// endpoint.
    #[error("transport error while fetching access token: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Token endpoint returned 2xx but the body was not a token.
    #[error("invalid token response: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

pub(crate) trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Caches the OAuth bearer token and refreshes it on demand.
///
/// The freshness check and the refresh-and-store both run under a single
/// lock acquisition, so concurrent callers observing a stale cache trigger
/// at most one network call and all wait for its outcome.
pub(crate) struct TokenManager {
    basic_authorization: String,
    auth_url: String,
    http: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    state: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub(crate) fn new(
        consumer_key: &ConsumerKey,
        consumer_secret: &ConsumerSecret,
        auth_url: String,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self::with_clock(
            consumer_key,
            consumer_secret,
            auth_url,
            http,
            Arc::new(SystemClock),
        )
    }

    fn with_clock(
        consumer_key: &ConsumerKey,
        consumer_secret: &ConsumerSecret,
        auth_url: String,
        http: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let credentials = format!("{}:{}", consumer_key.as_str(), consumer_secret.as_str());
        Self {
            basic_authorization: format!("Basic {}", STANDARD.encode(credentials.as_bytes())),
            auth_url,
            http,
            clock,
            state: Mutex::new(None),
        }
    }

    /// Return a valid bearer token, refreshing it over the wire if the
    /// cached one is absent or inside the expiry buffer.
    pub(crate) async fn access_token(&self) -> Result<String, AuthError> {
        let mut slot = self.state.lock().await;

        let now = self.clock.now();
        if let Some(cached) = slot.as_ref() {
            if now + TOKEN_EXPIRY_BUFFER < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }

        let response = self
            .http
            .get(&self.auth_url, &self.basic_authorization)
            .await
            .map_err(AuthError::Transport)?;

        if !response.is_success() {
            return Err(AuthError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let token = decode_access_token(&response.body)
            .map_err(|err| AuthError::Parse(Box::new(err)))?;

        let expires_at = now + Duration::from_secs(token.expires_in_secs);
        *slot = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }
}
