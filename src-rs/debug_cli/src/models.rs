use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct CLIConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct MoodRequest {
    pub user_id: String,
    pub mood: String,
}

#[derive(Debug, Deserialize)]
pub struct TipResponse {
    pub user_id: Option<String>,
    pub timestamp: String,
    pub tip: String,
}

#[derive(Debug)]
pub enum MoodReply {
    Tip(TipResponse),
    NoContent,
}
