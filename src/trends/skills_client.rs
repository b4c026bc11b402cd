// src/trends/skills_client.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use super::types::RawSkill;
use crate::config::SkillsApiConfig;

/// Source of raw skill keywords for a seed profile.
#[async_trait]
pub trait SkillsSource: Send + Sync {
    async fn fetch_skills(&self, seed: &str) -> Result<Vec<RawSkill>>;
}

#[derive(Debug, Deserialize)]
struct SkillsResponse {
    #[serde(default)]
    skills: Vec<RawSkill>,
}

/// HTTP client for the professional-network skills lookup API.
pub struct SkillsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SkillsClient {
    pub fn new(config: &SkillsApiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl SkillsSource for SkillsClient {
    async fn fetch_skills(&self, seed: &str) -> Result<Vec<RawSkill>> {
        info!("Fetching skills for seed profile: {}", seed);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("username", seed)])
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .context("Failed to call skills API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Skills API error {}: {}", status, error_text);
            anyhow::bail!("Skills API returned error status {}: {}", status, error_text);
        }

        let body: SkillsResponse = response
            .json()
            .await
            .context("Failed to parse skills API response")?;

        info!("Skills API returned {} skills for {}", body.skills.len(), seed);
        Ok(body.skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_response_decoding() {
        let body: SkillsResponse =
            serde_json::from_str(r#"{"skills":[{"name":"Rust"},{"name":"Leadership","endorsements":4}]}"#)
                .unwrap();
        assert_eq!(body.skills, vec![RawSkill::new("Rust"), RawSkill::new("Leadership")]);

        let empty: SkillsResponse = serde_json::from_str(r#"{"profile":"x"}"#).unwrap();
        assert!(empty.skills.is_empty());
    }
}
