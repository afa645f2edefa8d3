use crate::api::required;
use crate::error::AnalyticsResult;
use crate::models::ChannelAnalytics;
use crate::services::channel_service;
use crate::AppState;
use log::info;
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::{post, FromForm, State};

#[derive(Debug, FromForm)]
pub struct ChannelUrlForm {
    pub channel_url: Vec<String>,
}

#[post("/analyze-channel", data = "<form>")]
pub async fn analyze_channel(
    form: Form<ChannelUrlForm>,
    state: &State<AppState>,
) -> AnalyticsResult<Json<ChannelAnalytics>> {
    let channel_url = required(form.into_inner().channel_url, "Channel URL")?;

    let analytics =
        channel_service::get_channel_analytics(state.platform.as_ref(), &channel_url).await?;
    info!(
        "Channel analysis for {} complete ({} recent videos).",
        analytics.channel.id,
        analytics.recent_videos.len()
    );
    Ok(Json(analytics))
}
