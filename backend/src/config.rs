use crate::services::sentiment::LexiconScorer;
use crate::services::youtube_client::{YouTubeClient, DEFAULT_API_BASE_URL};
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::sync::Arc;

lazy_static! {
    pub static ref YOUTUBE_API_BASE_URL: String =
        env::var("YOUTUBE_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    pub static ref CORS_ALLOWED_ORIGINS: Vec<String> = env::var("CORS_ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8000".to_string())
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting analytics backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn youtube_api_key() -> Result<String> {
    env::var("YOUTUBE_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY environment variable must be set"))
}

pub fn create_youtube_client() -> Result<YouTubeClient> {
    let api_key = youtube_api_key()?;
    let base_url = &*YOUTUBE_API_BASE_URL;
    info!("Using YouTube Data API at: {base_url}");

    Ok(YouTubeClient::new(api_key, base_url.as_str()))
}

pub fn create_app_state() -> Result<AppState> {
    Ok(AppState {
        platform: Arc::new(create_youtube_client()?),
        scorer: Arc::new(LexiconScorer::new()),
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    info!("Allowing CORS origins: {:?}", *CORS_ALLOWED_ORIGINS);

    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(CORS_ALLOWED_ORIGINS.as_slice()))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
