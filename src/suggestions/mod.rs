// src/suggestions/mod.rs
//! On-demand topic ideas from a free-text LLM completion.

pub mod parser;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::llm_client::{ChatCompletion, ChatMessage, ChatRequest};
pub use parser::parse_suggestions;

const SUGGESTION_SYSTEM_PROMPT: &str = "You are an expert on LinkedIn engagement and professional content. \
Generate 6 high-quality LinkedIn post topic ideas that professionals would find valuable and engaging. \
Each topic should be specific, actionable, and formatted with an emoji icon, title, and brief description.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTopic {
    pub id: u32,
    pub label: String,
    pub icon: String,
    pub trending: bool,
    pub description: String,
}

pub fn suggestion_request(user_input: Option<&str>) -> ChatRequest {
    let prompt = match user_input.map(str::trim).filter(|input| !input.is_empty()) {
        Some(input) => format!("Generate LinkedIn post topic ideas related to: {}", input),
        None => "Generate trending LinkedIn post topic ideas for professionals".to_string(),
    };

    ChatRequest {
        messages: vec![
            ChatMessage::system(SUGGESTION_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ],
        temperature: 0.7,
        json_mode: false,
    }
}

pub async fn suggest_topics(
    llm: &dyn ChatCompletion,
    user_input: Option<&str>,
) -> Result<Vec<SuggestedTopic>> {
    let content = llm.complete(&suggestion_request(user_input)).await?;
    let topics = parse_suggestions(&content);
    info!("Parsed {} topic suggestions", topics.len());
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingLlm {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatCompletion for RecordingLlm {
        async fn complete(&self, request: &ChatRequest) -> Result<String> {
            let prompt = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.prompts.lock().unwrap().push(prompt);
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_request_uses_input_when_present() {
        let request = suggestion_request(Some("  developer relations "));
        assert!(!request.json_mode);
        assert_eq!(
            request.messages[1].content,
            "Generate LinkedIn post topic ideas related to: developer relations"
        );

        let generic = suggestion_request(Some("   "));
        assert_eq!(
            generic.messages[1].content,
            "Generate trending LinkedIn post topic ideas for professionals"
        );
    }

    #[tokio::test]
    async fn test_suggest_topics_parses_completion() {
        let llm = RecordingLlm {
            reply: "🎯 Focus Time: Protecting deep work\n🤝 Mentoring: Giving back".to_string(),
            prompts: Mutex::new(Vec::new()),
        };

        let topics = suggest_topics(&llm, None).await.unwrap();

        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].label, "Focus Time");
        assert_eq!(topics[1].icon, "🤝");
        assert_eq!(llm.prompts.lock().unwrap().len(), 1);
    }
}
