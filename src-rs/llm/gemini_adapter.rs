use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::parse::parse_tip_list;
use super::rotation::Rotator;
use super::types::{AdapterError, TipList, TipSource};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_PROMPT: &str = "Return raw text containing 10 positive tips \
for someone feeling sad. \
Write each tip as one short, simple sentence. \
Avoid generic suggestions such as going for a walk, drinking water or calling a friend. \
Return them as a colon separated list, with [ and ] enclosing the whole list, \
and do not use colons anywhere inside a tip.";

pub struct GeminiConfig {
    pub api_keys: Vec<String>,
    pub base_url: String,
    pub model: String,
    pub prompt: String,
    pub timeout_secs: u64,
}

pub struct GeminiAdapter {
    cfg: GeminiConfig,
    rotator: Rotator,
    client: Client,
}

impl GeminiAdapter {
    pub fn new(mut cfg: GeminiConfig) -> Result<Self, AdapterError> {
        if cfg.base_url.is_empty() {
            cfg.base_url = DEFAULT_BASE_URL.to_string();
        }
        if cfg.model.is_empty() {
            cfg.model = DEFAULT_MODEL.to_string();
        }
        if cfg.prompt.trim().is_empty() {
            cfg.prompt = DEFAULT_PROMPT.to_string();
        }
        if cfg.timeout_secs == 0 {
            cfg.timeout_secs = 30;
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|err| AdapterError::Network(err.to_string()))?;
        Ok(Self {
            rotator: Rotator::new(cfg.api_keys.clone()),
            cfg,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        )
    }

    async fn send_request(&self, api_key: &str, payload: &Value) -> Result<String, AdapterError> {
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AdapterError::Timeout(self.cfg.timeout_secs)
                } else {
                    AdapterError::Network(err.to_string())
                }
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        if let Some(err) = classify_status(status, &body) {
            return Err(err);
        }

        let raw: Value =
            serde_json::from_str(&body).map_err(|err| AdapterError::Decode(err.to_string()))?;
        let text = response_text(&raw);
        if text.trim().is_empty() {
            return Err(AdapterError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl TipSource for GeminiAdapter {
    async fn refresh(&self) -> Result<TipList, AdapterError> {
        let tries = self.rotator.len();
        if tries == 0 {
            return Err(AdapterError::MissingCredentials);
        }
        let payload = build_payload(&self.cfg.prompt);

        let mut last_err = None;
        for attempt in 0..tries {
            let key = match self.rotator.next() {
                Some(key) => key,
                None => break,
            };
            match self.send_request(key, &payload).await {
                Ok(text) => {
                    debug!(attempt, chars = text.len(), "gemini returned tip text");
                    return parse_tip_list(&text);
                }
                Err(err) if err.is_retryable() && attempt + 1 < tries => {
                    warn!(attempt, error = %err, "gemini request failed, trying next key");
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err.unwrap_or(AdapterError::MissingCredentials))
    }
}

pub fn build_payload(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{"text": prompt}]
        }]
    })
}

fn classify_status(status: u16, body: &str) -> Option<AdapterError> {
    if status < 400 {
        return None;
    }
    let body = body.to_string();
    let lowered = body.to_lowercase();
    let err = if status == 401 || status == 403 {
        AdapterError::Auth { status, body }
    } else if status == 429 || lowered.contains("quota") || lowered.contains("resource_exhausted") {
        AdapterError::RateLimited { status, body }
    } else if status >= 500 {
        AdapterError::Server { status, body }
    } else {
        AdapterError::Api { status, body }
    };
    Some(err)
}

/// Concatenated text parts of the first candidate.
pub fn response_text(raw: &Value) -> String {
    let parts = raw
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|list| list.first())
        .and_then(|first| first.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|v| v.as_array());

    let mut text = String::new();
    for part in parts.into_iter().flatten() {
        if let Some(chunk) = part.get("text").and_then(|v| v.as_str()) {
            text.push_str(chunk);
        }
    }
    text
}
