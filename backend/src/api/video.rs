use crate::api::required;
use crate::error::AnalyticsResult;
use crate::models::{Comment, VideoAnalytics, VideoPerformance};
use crate::services::video_service;
use crate::AppState;
use log::info;
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::{post, FromForm, State};

const VIDEO_URL: &str = "Video URL";

#[derive(Debug, FromForm)]
pub struct VideoUrlForm {
    pub video_url: Vec<String>,
}

#[post("/analyze-video", data = "<form>")]
pub async fn analyze_video(
    form: Form<VideoUrlForm>,
    state: &State<AppState>,
) -> AnalyticsResult<Json<VideoPerformance>> {
    let video_url = required(form.into_inner().video_url, VIDEO_URL)?;

    let performance = video_service::get_video_performance(
        state.platform.as_ref(),
        state.scorer.as_ref(),
        &video_url,
    )
    .await?;
    info!("Video analysis for {} complete.", performance.video.id);
    Ok(Json(performance))
}

#[post("/video-comments", data = "<form>")]
pub async fn video_comments(
    form: Form<VideoUrlForm>,
    state: &State<AppState>,
) -> AnalyticsResult<Json<Vec<Comment>>> {
    let video_url = required(form.into_inner().video_url, VIDEO_URL)?;

    let comments = video_service::get_video_comments(state.platform.as_ref(), &video_url).await?;
    Ok(Json(comments))
}

#[post("/video-analytics", data = "<form>")]
pub async fn video_analytics(
    form: Form<VideoUrlForm>,
    state: &State<AppState>,
) -> AnalyticsResult<Json<VideoAnalytics>> {
    let video_url = required(form.into_inner().video_url, VIDEO_URL)?;

    let analytics = video_service::get_video_analytics(state.platform.as_ref(), &video_url).await?;
    Ok(Json(analytics))
}
