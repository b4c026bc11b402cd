// src/trends/hashtags.rs
use std::collections::HashSet;

use super::defaults::BASELINE_HASHTAGS;
use super::types::{Topic, MAX_HASHTAGS};

/// Turn a free-form label into a hashtag: whitespace removed, `#` prefixed.
/// Returns `None` when nothing is left.
pub fn to_hashtag(label: &str) -> Option<String> {
    let compact: String = label
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if compact.is_empty() {
        None
    } else {
        Some(format!("#{}", compact))
    }
}

/// Exact-match dedupe keeping first-seen order.
pub fn dedupe<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Snapshot-level hashtag list: every topic's tags, then the baseline pool,
/// deduped and capped.
pub fn aggregate(topics: &[Topic]) -> Vec<String> {
    let flattened = topics
        .iter()
        .flat_map(|topic| topic.hashtags.iter().cloned())
        .chain(BASELINE_HASHTAGS.iter().map(|tag| tag.to_string()));

    let mut tags = dedupe(flattened);
    tags.truncate(MAX_HASHTAGS);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic_with(id: u32, hashtags: &[&str]) -> Topic {
        Topic {
            id,
            topic: format!("Topic {}", id),
            description: String::new(),
            engagement: 80,
            growth: 10,
            hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
            related_topics: Vec::new(),
        }
    }

    #[test]
    fn test_to_hashtag() {
        assert_eq!(to_hashtag("Machine Learning"), Some("#MachineLearning".to_string()));
        assert_eq!(to_hashtag("#Rust"), Some("#Rust".to_string()));
        assert_eq!(to_hashtag("  "), None);
        assert_eq!(to_hashtag("#"), None);
    }

    #[test]
    fn test_shared_hashtag_kept_once_at_first_position() {
        let topics = vec![
            topic_with(1, &["#Growth", "#Leadership"]),
            topic_with(2, &["#Leadership", "#Teams"]),
        ];

        let tags = aggregate(&topics);
        let occurrences = tags.iter().filter(|t| *t == "#Leadership").count();

        assert_eq!(occurrences, 1);
        assert_eq!(tags[..3], ["#Growth", "#Leadership", "#Teams"]);
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        let tags = dedupe(vec!["#AI".to_string(), "#ai".to_string(), "#AI".to_string()]);
        assert_eq!(tags, vec!["#AI", "#ai"]);
    }

    #[test]
    fn test_empty_topics_yield_baseline_pool() {
        let tags = aggregate(&[topic_with(1, &[])]);
        assert_eq!(tags.len(), BASELINE_HASHTAGS.len());
        assert_eq!(tags[0], BASELINE_HASHTAGS[0]);
    }

    #[test]
    fn test_output_is_capped_and_unique() {
        let topics: Vec<Topic> = (1..=8)
            .map(|i| {
                let a = format!("#Tag{}", i);
                let b = format!("#Other{}", i);
                topic_with(i, &[a.as_str(), b.as_str(), "#Shared"])
            })
            .collect();

        let tags = aggregate(&topics);
        let unique: HashSet<&String> = tags.iter().collect();

        assert_eq!(tags.len(), MAX_HASHTAGS);
        assert_eq!(unique.len(), tags.len());
    }
}
