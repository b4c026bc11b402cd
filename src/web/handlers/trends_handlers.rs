// src/web/handlers/trends_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};
use uuid::Uuid;

use super::{api_error, parse_body, ApiError};
use crate::trends::{TrendError, TrendPipeline, TrendsResponse};
use crate::web::types::TrendsRequest;

pub async fn linkedin_trends_handler(
    body: String,
    pipeline: &State<TrendPipeline>,
) -> Result<Json<TrendsResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let request: TrendsRequest = parse_body(&body, request_id)?;

    info!(
        "[{}] Trend request received (force_refresh: {})",
        request_id, request.force_refresh
    );

    match pipeline.fetch_trends(request.force_refresh).await {
        Ok(response) => {
            info!(
                "[{}] Returning {} trends and {} hashtags from {}",
                request_id,
                response.trends.len(),
                response.hashtags.len(),
                response.source
            );
            Ok(Json(response))
        }
        Err(TrendError::Configuration(message)) => {
            error!("[{}] Trend pipeline misconfigured: {}", request_id, message);
            Err(api_error(Status::InternalServerError, message))
        }
    }
}
