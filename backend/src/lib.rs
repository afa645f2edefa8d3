pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use rocket::{catchers, routes, Build, Rocket};
use services::sentiment::PolarityScorer;
use services::youtube_client::PlatformClient;
use std::sync::Arc;

pub struct AppState {
    pub platform: Arc<dyn PlatformClient>,
    pub scorer: Arc<dyn PolarityScorer>,
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount(
            "/",
            routes![
                api::index,
                api::analyze_video,
                api::analyze_channel,
                api::video_comments,
                api::video_analytics,
            ],
        )
        .register(
            "/",
            catchers![api::catchers::unsupported_form, api::catchers::unprocessable_form],
        )
}
