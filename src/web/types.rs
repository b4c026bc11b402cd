// src/web/types.rs

use rocket::serde::{Deserialize, Serialize};

use crate::suggestions::SuggestedTopic;

#[derive(Debug, Default, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct TrendsRequest {
    #[serde(rename = "forceRefresh", default)]
    pub force_refresh: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SuggestRequest {
    #[serde(rename = "userInput", default)]
    pub user_input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SuggestionsResponse {
    pub topics: Vec<SuggestedTopic>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
    pub cache: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
