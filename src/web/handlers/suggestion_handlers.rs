// src/web/handlers/suggestion_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};
use uuid::Uuid;

use super::{api_error, parse_body, ApiError};
use crate::suggestions::suggest_topics;
use crate::trends::TrendPipeline;
use crate::web::types::{SuggestRequest, SuggestionsResponse};

pub async fn suggest_topics_handler(
    body: String,
    pipeline: &State<TrendPipeline>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let request: SuggestRequest = parse_body(&body, request_id)?;

    let llm = pipeline.llm().ok_or_else(|| {
        error!("[{}] Topic suggestions requested without an LLM key", request_id);
        api_error(
            Status::InternalServerError,
            "OPENAI_API_KEY environment variable not set",
        )
    })?;

    info!(
        "[{}] Suggesting topics for {:?}",
        request_id,
        request.user_input.as_deref().unwrap_or("trending")
    );

    match suggest_topics(llm.as_ref(), request.user_input.as_deref()).await {
        Ok(topics) => Ok(Json(SuggestionsResponse { topics })),
        Err(e) => {
            error!("[{}] Topic suggestion failed: {:#}", request_id, e);
            Err(api_error(
                Status::InternalServerError,
                format!("Failed to generate topic suggestions: {}", e),
            ))
        }
    }
}
