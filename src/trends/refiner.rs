// src/trends/refiner.rs
//! Turns raw skill keywords into display topics, through the LLM when one is
//! configured and deterministically otherwise.

use serde::Deserialize;
use tracing::{info, warn};

use super::defaults::{default_hashtag, default_topic_name, DEFAULT_TOPIC_NAMES};
use super::hashtags::{dedupe, to_hashtag};
use super::random::RandomSource;
use super::types::{RawSkill, Topic, MAX_TOPICS};
use crate::core::llm_client::{ChatCompletion, ChatMessage, ChatRequest};

const MAX_PROMPT_SKILLS: usize = 15;
const MAX_TOPIC_HASHTAGS: usize = 3;
const MAX_RELATED: usize = 3;

const AI_DESCRIPTION_FILLER: &str =
    "Professional insights and discussion points for your LinkedIn network";
const AI_RELATED_FILLER: &str = "Professional Development";

const REFINEMENT_SYSTEM_PROMPT: &str = "You are an expert on LinkedIn content trends and professional engagement. \
Turn the given skill keywords into exactly 8 trending LinkedIn post topics. \
Respond with a JSON object of the form {\"topics\": [...]} where each item has: \
\"title\" (short, engaging), \"description\" (15-20 words), \
\"hashtags\" (2-3 hashtags starting with #) and \"relatedKeywords\" (up to 3 related topics). \
Do not add explanations.";

/// Scores are illustrative only; see [`Topic`].
fn engagement_score(random: &dyn RandomSource) -> u32 {
    random.range(75, 95)
}

fn growth_score(random: &dyn RandomSource) -> u32 {
    random.range(5, 25)
}

/// Refine `skills` into at most [`MAX_TOPICS`] topics. Never returns an
/// empty list.
pub async fn refine_topics(
    skills: &[RawSkill],
    llm: Option<&dyn ChatCompletion>,
    random: &dyn RandomSource,
) -> Vec<Topic> {
    if let Some(llm) = llm {
        let topics = refine_with_ai(skills, llm, random).await;
        if !topics.is_empty() {
            info!("AI refinement produced {} topics", topics.len());
            return topics;
        }
        info!("AI refinement produced no topics, using standard processing");
    }

    standard_topics(skills, random)
}

async fn refine_with_ai(
    skills: &[RawSkill],
    llm: &dyn ChatCompletion,
    random: &dyn RandomSource,
) -> Vec<Topic> {
    let request = refinement_request(skills);

    match llm.complete(&request).await {
        Ok(content) => {
            let parsed = parse_ai_topics(&content);
            if matches!(parsed, ParsedTopics::Unparseable) {
                warn!("Discarding unparseable AI refinement response");
            }
            normalize_ai_topics(parsed, random)
        }
        Err(e) => {
            warn!("AI refinement failed: {:#}", e);
            Vec::new()
        }
    }
}

pub fn refinement_request(skills: &[RawSkill]) -> ChatRequest {
    let keywords = skills
        .iter()
        .filter_map(RawSkill::label)
        .take(MAX_PROMPT_SKILLS)
        .collect::<Vec<_>>()
        .join(", ");

    ChatRequest {
        messages: vec![
            ChatMessage::system(REFINEMENT_SYSTEM_PROMPT),
            ChatMessage::user(format!("Skill keywords: {}", keywords)),
        ],
        temperature: 0.7,
        json_mode: true,
    }
}

// ===== AI response parsing =====

/// One topic item as the LLM returned it. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AiTopic {
    #[serde(alias = "topic", alias = "name")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub hashtags: Option<Vec<String>>,
    #[serde(
        alias = "relatedKeywords",
        alias = "related_keywords",
        alias = "relatedTopics",
        alias = "related_topics"
    )]
    pub related: Option<Vec<String>>,
}

/// Shape of an LLM refinement response.
#[derive(Debug, Clone)]
pub enum ParsedTopics {
    /// Bare JSON array of topics.
    TopicList(Vec<AiTopic>),
    /// Object carrying a `topics` array.
    TopicsWrapper(Vec<AiTopic>),
    Unparseable,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AiPayload {
    List(Vec<AiTopic>),
    Wrapper { topics: Vec<AiTopic> },
}

fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

pub fn parse_ai_topics(content: &str) -> ParsedTopics {
    match serde_json::from_str::<AiPayload>(strip_code_blocks(content)) {
        Ok(AiPayload::List(items)) => ParsedTopics::TopicList(items),
        Ok(AiPayload::Wrapper { topics }) => ParsedTopics::TopicsWrapper(topics),
        Err(_) => ParsedTopics::Unparseable,
    }
}

/// Map any parse outcome to canonical topics. `Unparseable` maps to nothing
/// so the caller falls back as a whole.
pub fn normalize_ai_topics(parsed: ParsedTopics, random: &dyn RandomSource) -> Vec<Topic> {
    let items = match parsed {
        ParsedTopics::TopicList(items) | ParsedTopics::TopicsWrapper(items) => items,
        ParsedTopics::Unparseable => return Vec::new(),
    };

    items
        .into_iter()
        .take(MAX_TOPICS)
        .zip(1u32..)
        .map(|(item, n)| {
            let topic = item
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| format!("Professional Topic {}", n));

            let description = item
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| AI_DESCRIPTION_FILLER.to_string());

            Topic {
                id: n,
                topic,
                description,
                engagement: engagement_score(random),
                growth: growth_score(random),
                hashtags: ai_hashtags(item.hashtags.unwrap_or_default(), n),
                related_topics: ai_related(item.related.unwrap_or_default()),
            }
        })
        .collect()
}

fn ai_hashtags(raw: Vec<String>, n: u32) -> Vec<String> {
    let defaults = [format!("#Professional{}", n), "#LinkedInStrategy".to_string()];
    let mut tags = dedupe(raw.iter().filter_map(|tag| to_hashtag(tag)));

    if tags.is_empty() {
        return defaults.to_vec();
    }
    if tags.len() < 2 {
        tags = dedupe(tags.into_iter().chain(defaults));
    }
    tags.truncate(MAX_TOPIC_HASHTAGS);
    tags
}

fn ai_related(raw: Vec<String>) -> Vec<String> {
    let related: Vec<String> = dedupe(
        raw.into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
    )
    .into_iter()
    .take(MAX_RELATED)
    .collect();

    if related.is_empty() {
        vec![AI_RELATED_FILLER.to_string()]
    } else {
        related
    }
}

// ===== Standard processing =====

/// Deterministic transform: always [`MAX_TOPICS`] topics, labels taken from
/// the skills first and the default name pool after.
pub fn standard_topics(skills: &[RawSkill], random: &dyn RandomSource) -> Vec<Topic> {
    (0..MAX_TOPICS)
        .map(|index| {
            let skill = skills.get(index).and_then(RawSkill::label);
            let label = skill.unwrap_or_else(|| default_topic_name(index)).to_string();

            let mut hashtags = dedupe(
                [
                    to_hashtag(&label),
                    Some(default_hashtag(index).to_string()),
                ]
                .into_iter()
                .flatten(),
            );
            if hashtags.len() < 2 {
                hashtags = dedupe(hashtags.into_iter().chain(["#LinkedInStrategy".to_string()]));
            }

            Topic {
                id: index as u32 + 1,
                description: format!(
                    "Trending discussions about {} in professional settings",
                    label
                ),
                engagement: engagement_score(random),
                growth: growth_score(random),
                hashtags,
                related_topics: related_topics(index, &label, skills),
                topic: label,
            }
        })
        .collect()
}

/// Other skills' names, starting after `index` and wrapping, topped up from
/// the default name pool.
fn related_topics(index: usize, label: &str, skills: &[RawSkill]) -> Vec<String> {
    let mut related: Vec<String> = Vec::with_capacity(MAX_RELATED);
    let mut push = |name: &str| {
        if related.len() < MAX_RELATED && name != label && !related.iter().any(|r| r == name) {
            related.push(name.to_string());
        }
    };

    let count = skills.len();
    for j in (1..=count).map(|offset| (index + offset) % count) {
        if j != index {
            if let Some(name) = skills[j].label() {
                push(name);
            }
        }
    }
    for k in index + 1..index + 1 + DEFAULT_TOPIC_NAMES.len() {
        push(default_topic_name(k));
    }

    related
}
