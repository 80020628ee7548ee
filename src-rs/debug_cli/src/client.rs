use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::models::{MoodReply, MoodRequest, TipResponse};

pub struct HTTPClient {
    pub base_url: String,
    pub token: Option<String>,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn send_mood(&self, req: &MoodRequest) -> Result<MoodReply, String> {
        let url = format!("{}/microtips", self.base_url);
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let value = format!("Bearer {}", token);
            if let Ok(header) = HeaderValue::from_str(&value) {
                headers.insert(AUTHORIZATION, header);
            }
        }

        let resp = self
            .client
            .post(url)
            .headers(headers)
            .json(req)
            .send()
            .map_err(|err| err.to_string())?;

        match resp.status() {
            StatusCode::NO_CONTENT => Ok(MoodReply::NoContent),
            status if status.is_success() => resp
                .json::<TipResponse>()
                .map(MoodReply::Tip)
                .map_err(|err| err.to_string()),
            status => {
                let body = resp.text().unwrap_or_default();
                Err(format!("http {}: {}", status.as_u16(), body))
            }
        }
    }

    pub fn health(&self) -> Result<serde_json::Value, String> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(url).send().map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            resp.json::<serde_json::Value>().map_err(|err| err.to_string())
        } else {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            Err(format!("http {}: {}", status.as_u16(), body))
        }
    }
}
