// src/trends/mod.rs
//! Trending topic suggestions backed by a six-hour snapshot cache.

pub mod cache;
pub mod defaults;
pub mod hashtags;
pub mod pipeline;
pub mod random;
pub mod refiner;
pub mod skills_client;
pub mod types;

pub use cache::{SnapshotStore, SqliteSnapshotStore};
pub use pipeline::TrendPipeline;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use types::{RawSkill, Source, Topic, TrendSnapshot, TrendsResponse};

#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    /// A required credential is missing. Nothing useful can be returned.
    #[error("{0}")]
    Configuration(String),
}
