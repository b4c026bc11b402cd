// src/core/mod.rs
pub mod database;
pub mod llm_client;

pub use database::Database;
pub use llm_client::{ChatCompletion, ChatMessage, ChatRequest, OpenAiChatClient};
