use async_trait::async_trait;
use thiserror::Error;

/// Ordered tips as produced by a source; order defines round-robin order.
pub type TipList = Vec<String>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("no API keys configured")]
    MissingCredentials,
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("auth error ({status}): {body}")]
    Auth { status: u16, body: String },
    #[error("rate limited ({status}): {body}")]
    RateLimited { status: u16, body: String },
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("api error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("invalid response json: {0}")]
    Decode(String),
    #[error("response contained no text")]
    EmptyResponse,
    #[error("no tips found in response text")]
    NoTips,
}

impl AdapterError {
    /// Whether another key may succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdapterError::Network(_)
                | AdapterError::Timeout(_)
                | AdapterError::Auth { .. }
                | AdapterError::RateLimited { .. }
                | AdapterError::Server { .. }
        )
    }
}

/// Somewhere fresh tips come from.
///
/// Implementations perform the outbound call and parsing only; they never
/// touch cache state, and they do not retry beyond what they document.
#[async_trait]
pub trait TipSource: Send + Sync {
    async fn refresh(&self) -> Result<TipList, AdapterError>;
}
