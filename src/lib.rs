pub mod backend;
pub mod checks;
pub mod config;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod params;
pub mod windows;

use std::sync::Arc;

use config::GateConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<GateConfig>,
}
