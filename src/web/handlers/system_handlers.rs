// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::trends::TrendPipeline;
use crate::web::types::HealthResponse;

pub async fn health_handler(pipeline: &State<TrendPipeline>) -> Json<HealthResponse> {
    let cache = match pipeline.store().health_check().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!("Trend cache unavailable: {:#}", e);
            "unavailable"
        }
    };

    info!("Health check (cache: {})", cache);

    Json(HealthResponse {
        status: "ok".to_string(),
        cache: cache.to_string(),
    })
}
