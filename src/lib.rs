//! LinkedCraft backend: cached LinkedIn trend suggestions and on-demand
//! topic ideas over a small JSON API.

pub mod cli;
pub mod config;
pub mod core;
pub mod suggestions;
pub mod trends;
pub mod web;

pub use config::AppConfig;
pub use trends::{TrendPipeline, TrendsResponse};
pub use web::{build_rocket, start_web_server};
