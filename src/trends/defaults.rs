// src/trends/defaults.rs
//! Static topic and hashtag tables used by the standard refiner and the
//! fallback response.

use chrono::{DateTime, Utc};

use super::types::{Topic, TrendSnapshot};

/// Label pool cycled by index when a skill name is unavailable.
pub const DEFAULT_TOPIC_NAMES: [&str; 12] = [
    "Leadership",
    "Artificial Intelligence",
    "Remote Work",
    "Digital Transformation",
    "Career Development",
    "Innovation",
    "Professional Development",
    "Networking",
    "Entrepreneurship",
    "Personal Branding",
    "Workplace Culture",
    "Future of Work",
];

/// Hashtags cycled per topic by the standard refiner.
pub const TOPIC_HASHTAGS: [&str; 12] = [
    "#ThoughtLeadership",
    "#TechTrends",
    "#HybridWork",
    "#BusinessStrategy",
    "#CareerGrowth",
    "#FutureOfWork",
    "#Upskilling",
    "#ProfessionalNetworking",
    "#StartupLife",
    "#LinkedInTips",
    "#WorkCulture",
    "#Innovation",
];

/// Baseline pool merged into every snapshot's hashtag list.
pub const BASELINE_HASHTAGS: [&str; 12] = [
    "#LeadershipSkills",
    "#ArtificialIntelligence",
    "#RemoteWork",
    "#DigitalTransformation",
    "#CareerAdvice",
    "#Innovation",
    "#ProfessionalDevelopment",
    "#Networking",
    "#StartupLife",
    "#LinkedInTips",
    "#WorkCulture",
    "#FutureOfWork",
];

pub const DEFAULT_SEED_PROFILES: [&str; 6] = [
    "satyanadella",
    "williamhgates",
    "reidhoffman",
    "jeffweiner08",
    "adamgrant",
    "melindagates",
];

struct FallbackTopic {
    topic: &'static str,
    description: &'static str,
    engagement: u32,
    growth: u32,
    hashtags: &'static [&'static str],
    related: &'static [&'static str],
}

const FALLBACK_TOPICS: [FallbackTopic; 6] = [
    FallbackTopic {
        topic: "Remote Work",
        description: "Discussions about hybrid work models and remote productivity",
        engagement: 87,
        growth: 12,
        hashtags: &["#RemoteWork", "#HybridWork", "#FutureOfWork"],
        related: &["Work-Life Balance", "Digital Workspace Tools"],
    },
    FallbackTopic {
        topic: "AI in Business",
        description: "How artificial intelligence is transforming business operations",
        engagement: 93,
        growth: 23,
        hashtags: &["#AIBusiness", "#MachineLearning", "#BusinessInnovation"],
        related: &["Data Science", "Automation", "Digital Transformation"],
    },
    FallbackTopic {
        topic: "Personal Branding",
        description: "Building and maintaining your professional online presence",
        engagement: 78,
        growth: 8,
        hashtags: &["#PersonalBranding", "#LinkedInStrategy", "#ProfessionalGrowth"],
        related: &["Content Strategy", "LinkedIn Optimization", "Career Growth"],
    },
    FallbackTopic {
        topic: "Leadership Skills",
        description: "Developing essential skills for modern leadership",
        engagement: 82,
        growth: 5,
        hashtags: &["#Leadership", "#ManagementTips", "#TeamBuilding"],
        related: &["Emotional Intelligence", "Team Management", "Communication"],
    },
    FallbackTopic {
        topic: "Digital Transformation",
        description: "How businesses are adapting to the digital landscape",
        engagement: 89,
        growth: 15,
        hashtags: &["#DigitalTransformation", "#BusinessStrategy", "#Innovation"],
        related: &["Change Management", "Technology Adoption", "Business Models"],
    },
    FallbackTopic {
        topic: "Work-Life Balance",
        description: "Strategies for maintaining balance in professional careers",
        engagement: 76,
        growth: 9,
        hashtags: &["#WorkLifeBalance", "#Wellness", "#ProductivityTips"],
        related: &["Mental Health", "Productivity", "Self-Care"],
    },
];

pub fn default_topic_name(index: usize) -> &'static str {
    DEFAULT_TOPIC_NAMES[index % DEFAULT_TOPIC_NAMES.len()]
}

pub fn default_hashtag(index: usize) -> &'static str {
    TOPIC_HASHTAGS[index % TOPIC_HASHTAGS.len()]
}

/// Hard-coded snapshot served when the skills lookup fails outright.
pub fn fallback_snapshot(now: DateTime<Utc>) -> TrendSnapshot {
    let topics = FALLBACK_TOPICS
        .iter()
        .zip(1..)
        .map(|(entry, id)| Topic {
            id,
            topic: entry.topic.to_string(),
            description: entry.description.to_string(),
            engagement: entry.engagement,
            growth: entry.growth,
            hashtags: entry.hashtags.iter().map(|s| s.to_string()).collect(),
            related_topics: entry.related.iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    TrendSnapshot {
        topics,
        hashtags: BASELINE_HASHTAGS.iter().map(|s| s.to_string()).collect(),
        created_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cycle_by_index() {
        assert_eq!(default_topic_name(0), "Leadership");
        assert_eq!(default_topic_name(12), "Leadership");
        assert_eq!(default_hashtag(13), "#TechTrends");
    }

    #[test]
    fn test_cycled_hashtag_differs_from_default_label_tag() {
        for index in 0..DEFAULT_TOPIC_NAMES.len() {
            let label_tag = format!("#{}", default_topic_name(index).replace(' ', ""));
            assert_ne!(label_tag, default_hashtag(index));
        }
    }

    #[test]
    fn test_fallback_snapshot_has_six_named_topics() {
        let snapshot = fallback_snapshot(Utc::now());
        let labels: Vec<&str> = snapshot.topics.iter().map(|t| t.topic.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "Remote Work",
                "AI in Business",
                "Personal Branding",
                "Leadership Skills",
                "Digital Transformation",
                "Work-Life Balance",
            ]
        );
        assert_eq!(snapshot.topics[5].id, 6);
        assert_eq!(snapshot.hashtags, BASELINE_HASHTAGS.to_vec());
    }
}
