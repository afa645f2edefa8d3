use crate::error::AnalyticsResult;
use crate::models::ChannelAnalytics;
use crate::services::analytics_service::{
    analyze_upload_frequency, recent_videos, summarize_channel_trends,
};
use crate::services::url_service::extract_channel_id;
use crate::services::youtube_client::PlatformClient;
use chrono::{DateTime, Utc};
use log::info;

pub const MAX_UPLOADS: usize = 50;
const RECENT_VIDEO_COUNT: usize = 10;

pub async fn get_channel_analytics(
    platform: &dyn PlatformClient,
    channel_url: &str,
) -> AnalyticsResult<ChannelAnalytics> {
    let channel_id = extract_channel_id(platform, channel_url).await?;
    let channel = platform.fetch_channel(&channel_id).await?;
    let uploads = platform.fetch_channel_uploads(&channel_id, MAX_UPLOADS).await?;

    info!(
        "Analyzing channel {} ({channel_id}) over {} uploads",
        channel.title,
        uploads.len()
    );

    let published: Vec<DateTime<Utc>> = uploads.iter().map(|v| v.published_at).collect();

    Ok(ChannelAnalytics {
        channel,
        upload_analysis: analyze_upload_frequency(&published),
        trends: summarize_channel_trends(&uploads),
        recent_videos: recent_videos(&uploads, RECENT_VIDEO_COUNT),
    })
}
