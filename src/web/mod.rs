// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Provider;
use rocket::http::{Header, Status};
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::config::ServerSettings;
use crate::trends::{TrendPipeline, TrendsResponse};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
    }
}

#[post("/linkedin-trends", data = "<body>")]
pub async fn linkedin_trends(
    body: String,
    pipeline: &State<TrendPipeline>,
) -> Result<Json<TrendsResponse>, ApiError> {
    handlers::linkedin_trends_handler(body, pipeline).await
}

#[post("/suggest-topics", data = "<body>")]
pub async fn suggest_topics(
    body: String,
    pipeline: &State<TrendPipeline>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    handlers::suggest_topics_handler(body, pipeline).await
}

#[get("/health")]
pub async fn health(pipeline: &State<TrendPipeline>) -> Json<HealthResponse> {
    handlers::health_handler(pipeline).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::NoContent
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request format"))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(format!("No route for {}", request.uri())))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error"))
}

#[rocket::catch(default)]
pub fn default_error(status: Status, _request: &Request) -> Custom<Json<ErrorResponse>> {
    Custom(status, Json(ErrorResponse::new(format!("Request failed: {}", status))))
}

pub fn build_rocket<P: Provider>(provider: P, pipeline: TrendPipeline) -> Rocket<Build> {
    rocket::custom(provider)
        .attach(Cors)
        .manage(pipeline)
        .register("/", catchers![bad_request, not_found, internal_error, default_error])
        .mount(
            "/api",
            routes![linkedin_trends, suggest_topics, health, options],
        )
}

// Main server start function
pub async fn start_web_server(server: &ServerSettings, pipeline: TrendPipeline) -> Result<()> {
    let figment = rocket::Config::figment()
        .merge(("address", server.address.clone()))
        .merge(("port", server.port));

    info!("Starting LinkedCraft API server");
    info!("Server: http://{}:{}", server.address, server.port);

    let _rocket = build_rocket(figment, pipeline)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
