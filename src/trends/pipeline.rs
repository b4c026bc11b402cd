// src/trends/pipeline.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::cache::{is_fresh, SnapshotStore};
use super::defaults::{fallback_snapshot, DEFAULT_SEED_PROFILES};
use super::hashtags::aggregate;
use super::random::RandomSource;
use super::refiner::refine_topics;
use super::skills_client::{SkillsClient, SkillsSource};
use super::types::{Source, TrendSnapshot, TrendsResponse};
use super::TrendError;
use crate::config::{AppConfig, TrendsConfig};
use crate::core::llm_client::{ChatCompletion, OpenAiChatClient};

/// Cache read, skills fetch, refinement, hashtag aggregation, cache write.
/// One sequential run per call; shared read-only between requests.
pub struct TrendPipeline {
    config: TrendsConfig,
    store: Arc<dyn SnapshotStore>,
    skills: Option<Arc<dyn SkillsSource>>,
    llm: Option<Arc<dyn ChatCompletion>>,
    random: Arc<dyn RandomSource>,
}

impl TrendPipeline {
    pub fn new(
        config: TrendsConfig,
        store: Arc<dyn SnapshotStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            store,
            skills: None,
            llm: None,
            random,
        }
    }

    pub fn with_skills_source(mut self, skills: Arc<dyn SkillsSource>) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn with_llm(mut self, llm: Arc<dyn ChatCompletion>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Wire the HTTP collaborators for whichever credentials are configured.
    pub fn from_app_config(
        config: &AppConfig,
        store: Arc<dyn SnapshotStore>,
        random: Arc<dyn RandomSource>,
    ) -> Result<Self> {
        let mut pipeline = Self::new(config.trends.clone(), store, random);

        match &config.skills_api.api_key {
            Some(key) => {
                let client = SkillsClient::new(&config.skills_api, key.clone())?;
                pipeline = pipeline.with_skills_source(Arc::new(client));
            }
            None => warn!("SKILLS_API_KEY not set, trend requests will fail"),
        }

        match &config.llm.api_key {
            Some(key) => {
                let client = OpenAiChatClient::new(&config.llm, key.clone())?;
                pipeline = pipeline.with_llm(Arc::new(client));
            }
            None => info!("OPENAI_API_KEY not set, using standard topic processing"),
        }

        Ok(pipeline)
    }

    pub fn store(&self) -> &Arc<dyn SnapshotStore> {
        &self.store
    }

    pub fn llm(&self) -> Option<&Arc<dyn ChatCompletion>> {
        self.llm.as_ref()
    }

    pub async fn fetch_trends(&self, force_refresh: bool) -> Result<TrendsResponse, TrendError> {
        let skills_source = self.skills.as_ref().ok_or_else(|| {
            TrendError::Configuration("SKILLS_API_KEY environment variable not set".to_string())
        })?;

        if force_refresh {
            info!("Force refresh requested, skipping trend cache");
        } else if let Some(snapshot) = self.read_cache(Utc::now()).await {
            return Ok(TrendsResponse::from_snapshot(snapshot, Source::Cache));
        }

        let seed = self.pick_seed();
        let skills = match skills_source.fetch_skills(&seed).await {
            Ok(skills) => skills,
            Err(e) => {
                error!("Skills lookup failed for {}: {:#}", seed, e);
                return Ok(TrendsResponse::from_snapshot(
                    fallback_snapshot(Utc::now()),
                    Source::Fallback,
                ));
            }
        };

        let topics = refine_topics(&skills, self.llm.as_deref(), self.random.as_ref()).await;
        let hashtags = aggregate(&topics);
        let snapshot = TrendSnapshot {
            topics,
            hashtags,
            created_at: Utc::now(),
        };

        self.write_cache(&snapshot).await;

        Ok(TrendsResponse::from_snapshot(snapshot, Source::Api))
    }

    async fn read_cache(&self, now: DateTime<Utc>) -> Option<TrendSnapshot> {
        let snapshot = match self.store.latest().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                info!("Trend cache empty");
                return None;
            }
            Err(e) => {
                warn!("Trend cache read failed, recomputing: {:#}", e);
                return None;
            }
        };

        let age = now.signed_duration_since(snapshot.created_at);
        let hours_since_update = age.num_seconds() as f64 / 3600.0;

        if is_fresh(snapshot.created_at, now, self.config.freshness_hours) {
            info!("Trend cache hit ({:.2}h old)", hours_since_update);
            Some(snapshot)
        } else {
            info!("Trend cache stale ({:.2}h old)", hours_since_update);
            None
        }
    }

    async fn write_cache(&self, snapshot: &TrendSnapshot) {
        match self.store.insert(snapshot).await {
            Ok(()) => info!(
                "Cached trend snapshot with {} topics and {} hashtags",
                snapshot.topics.len(),
                snapshot.hashtags.len()
            ),
            Err(e) => error!("Failed to cache trend snapshot: {:#}", e),
        }
    }

    fn pick_seed(&self) -> String {
        let configured: Vec<&str> = self
            .config
            .seed_profiles
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        let pool = if configured.is_empty() {
            DEFAULT_SEED_PROFILES.to_vec()
        } else {
            configured
        };

        pool[self.random.index(pool.len())].to_string()
    }
}
