pub mod suggestion_handlers;
pub mod system_handlers;
pub mod trends_handlers;

pub use suggestion_handlers::*;
pub use system_handlers::*;
pub use trends_handlers::*;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use crate::web::types::ErrorResponse;

pub type ApiError = Custom<Json<ErrorResponse>>;

pub fn api_error(status: Status, message: impl Into<String>) -> ApiError {
    Custom(status, Json(ErrorResponse::new(message)))
}

/// An empty body means "all defaults"; anything else must be valid JSON.
pub fn parse_body<T>(body: &str, request_id: Uuid) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(body).map_err(|e| {
        warn!("[{}] Rejecting malformed request body: {}", request_id, e);
        api_error(Status::BadRequest, format!("Invalid request body: {}", e))
    })
}
