// src/trends/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_TOPICS: usize = 8;
pub const MAX_HASHTAGS: usize = 15;

/// One suggested content theme.
///
/// `engagement` and `growth` are illustrative placeholders drawn at generation
/// time. They are not measured analytics and must not be read as real signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: u32,
    pub topic: String,
    pub description: String,
    /// Synthetic score in 75..=94.
    pub engagement: u32,
    /// Synthetic score in 5..=24.
    pub growth: u32,
    pub hashtags: Vec<String>,
    pub related_topics: Vec<String>,
}

/// Skill entry returned by the skills lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSkill {
    #[serde(default)]
    pub name: String,
}

impl RawSkill {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Trimmed name, `None` when blank.
    pub fn label(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// One cached result of the trend pipeline. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub topics: Vec<Topic>,
    pub hashtags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Row metadata for listing the snapshot log.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub topic_count: usize,
    pub hashtag_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Api,
    Fallback,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Source::Cache => "cache",
            Source::Api => "api",
            Source::Fallback => "fallback",
        };
        f.write_str(tag)
    }
}

/// Wire payload of the trends endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsResponse {
    pub trends: Vec<Topic>,
    pub hashtags: Vec<String>,
    pub source: Source,
    pub updated_at: DateTime<Utc>,
}

impl TrendsResponse {
    pub fn from_snapshot(snapshot: TrendSnapshot, source: Source) -> Self {
        Self {
            trends: snapshot.topics,
            hashtags: snapshot.hashtags,
            source,
            updated_at: snapshot.created_at,
        }
    }
}
