// src/trends/cache.rs
//! Append-only snapshot log. The newest row is the cache entry; older rows
//! are only kept for history.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use super::types::{SnapshotSummary, TrendSnapshot};
use crate::core::Database;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Most recently created snapshot, if any.
    async fn latest(&self) -> Result<Option<TrendSnapshot>>;

    async fn insert(&self, snapshot: &TrendSnapshot) -> Result<()>;

    async fn history(&self, limit: u32) -> Result<Vec<SnapshotSummary>>;

    /// Delete all but the `keep` newest snapshots. Returns the number removed.
    async fn prune(&self, keep: u32) -> Result<u64>;

    async fn health_check(&self) -> Result<()>;
}

/// A snapshot counts as fresh while strictly younger than the window.
pub fn is_fresh(created_at: DateTime<Utc>, now: DateTime<Utc>, window_hours: i64) -> bool {
    now.signed_duration_since(created_at) < Duration::hours(window_hours)
}

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    id: i64,
    topics: String,
    hashtags: String,
    created_at: DateTime<Utc>,
}

impl SnapshotRow {
    fn into_snapshot(self) -> Result<TrendSnapshot> {
        let topics = serde_json::from_str(&self.topics)
            .with_context(|| format!("Corrupt topics column in snapshot {}", self.id))?;
        let hashtags = serde_json::from_str(&self.hashtags)
            .with_context(|| format!("Corrupt hashtags column in snapshot {}", self.id))?;

        Ok(TrendSnapshot {
            topics,
            hashtags,
            created_at: self.created_at,
        })
    }
}

pub struct SqliteSnapshotStore {
    db: Database,
}

impl SqliteSnapshotStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn latest(&self) -> Result<Option<TrendSnapshot>> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT id, topics, hashtags, created_at
            FROM trend_snapshots
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool())
        .await
        .context("Failed to read latest trend snapshot")?;

        row.map(SnapshotRow::into_snapshot).transpose()
    }

    async fn insert(&self, snapshot: &TrendSnapshot) -> Result<()> {
        let topics = serde_json::to_string(&snapshot.topics).context("Failed to encode topics")?;
        let hashtags =
            serde_json::to_string(&snapshot.hashtags).context("Failed to encode hashtags")?;

        sqlx::query(
            r#"
            INSERT INTO trend_snapshots (topics, hashtags, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(topics)
        .bind(hashtags)
        .bind(snapshot.created_at)
        .execute(self.pool())
        .await
        .context("Failed to insert trend snapshot")?;

        Ok(())
    }

    async fn history(&self, limit: u32) -> Result<Vec<SnapshotSummary>> {
        let rows = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT id, topics, hashtags, created_at
            FROM trend_snapshots
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .context("Failed to list trend snapshots")?;

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                let snapshot = row.into_snapshot()?;
                Ok(SnapshotSummary {
                    id,
                    created_at: snapshot.created_at,
                    topic_count: snapshot.topics.len(),
                    hashtag_count: snapshot.hashtags.len(),
                })
            })
            .collect()
    }

    async fn prune(&self, keep: u32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM trend_snapshots
            WHERE id NOT IN (
                SELECT id FROM trend_snapshots
                ORDER BY created_at DESC, id DESC
                LIMIT ?
            )
            "#,
        )
        .bind(i64::from(keep))
        .execute(self.pool())
        .await
        .context("Failed to prune trend snapshots")?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<()> {
        self.db.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::types::Topic;

    async fn store() -> SqliteSnapshotStore {
        SqliteSnapshotStore::new(Database::in_memory().await.unwrap())
    }

    fn snapshot(label: &str, created_at: DateTime<Utc>) -> TrendSnapshot {
        TrendSnapshot {
            topics: vec![Topic {
                id: 1,
                topic: label.to_string(),
                description: format!("About {}", label),
                engagement: 90,
                growth: 20,
                hashtags: vec![format!("#{}", label)],
                related_topics: vec![],
            }],
            hashtags: vec![format!("#{}", label), "#Innovation".to_string()],
            created_at,
        }
    }

    #[test]
    fn test_freshness_boundary() {
        let now = Utc::now();
        assert!(is_fresh(now - Duration::minutes(359), now, 6));
        assert!(!is_fresh(now - Duration::minutes(361), now, 6));
        assert!(!is_fresh(now - Duration::hours(6), now, 6));
        assert!(is_fresh(now, now, 6));
    }

    #[tokio::test]
    async fn test_empty_store_has_no_latest() {
        let store = store().await;
        assert!(store.latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_returns_most_recent_snapshot() {
        let store = store().await;
        let now = Utc::now();

        store.insert(&snapshot("Older", now - Duration::hours(2))).await.unwrap();
        store.insert(&snapshot("Newer", now)).await.unwrap();
        store.insert(&snapshot("Backfilled", now - Duration::hours(5))).await.unwrap();

        let latest = store.latest().await.unwrap().unwrap();
        assert_eq!(latest, snapshot("Newer", now));
    }

    #[tokio::test]
    async fn test_corrupt_row_surfaces_as_error() {
        let store = store().await;
        sqlx::query("INSERT INTO trend_snapshots (topics, hashtags, created_at) VALUES ('not json', '[]', ?)")
            .bind(Utc::now())
            .execute(store.pool())
            .await
            .unwrap();

        assert!(store.latest().await.is_err());
    }

    #[tokio::test]
    async fn test_history_and_prune() {
        let store = store().await;
        let now = Utc::now();
        for hours in 0..5 {
            store
                .insert(&snapshot(&format!("T{}", hours), now - Duration::hours(hours)))
                .await
                .unwrap();
        }

        let history = store.history(3).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].created_at, now);
        assert_eq!(history[0].topic_count, 1);
        assert_eq!(history[0].hashtag_count, 2);

        let removed = store.prune(2).await.unwrap();
        assert_eq!(removed, 3);
        assert_eq!(store.history(10).await.unwrap().len(), 2);
        assert_eq!(store.latest().await.unwrap().unwrap().created_at, now);
    }
}
