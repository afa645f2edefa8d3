use crate::error::AnalyticsResult;
use crate::models::{Comment, VideoAnalytics, VideoPerformance};
use crate::services::analytics_service::{
    analyze_sentiment, analyze_tags, calculate_engagement, project_timeline,
};
use crate::services::sentiment::PolarityScorer;
use crate::services::url_service::extract_video_id;
use crate::services::youtube_client::PlatformClient;
use chrono::Utc;
use log::info;

pub const MAX_COMMENTS: usize = 100;

pub async fn get_video_comments(
    platform: &dyn PlatformClient,
    video_url: &str,
) -> AnalyticsResult<Vec<Comment>> {
    let video_id = extract_video_id(video_url)?;
    let comments = platform.fetch_comment_threads(&video_id, MAX_COMMENTS).await?;
    info!("Fetched {} comments for video {video_id}", comments.len());
    Ok(comments)
}

pub async fn get_video_analytics(
    platform: &dyn PlatformClient,
    video_url: &str,
) -> AnalyticsResult<VideoAnalytics> {
    let video_id = extract_video_id(video_url)?;
    let video = platform.fetch_video(&video_id).await?;

    Ok(VideoAnalytics {
        views: video.view_count,
        likes: video.like_count,
        comments: video.comment_count,
        metrics: calculate_engagement(video.view_count, video.like_count, video.comment_count),
    })
}

/// Full report for one video: engagement, comment sentiment, tags and the
/// estimated view timeline.
pub async fn get_video_performance(
    platform: &dyn PlatformClient,
    scorer: &dyn PolarityScorer,
    video_url: &str,
) -> AnalyticsResult<VideoPerformance> {
    let video_id = extract_video_id(video_url)?;
    let video = platform.fetch_video(&video_id).await?;
    let comments = platform.fetch_comment_threads(&video_id, MAX_COMMENTS).await?;

    info!(
        "Analyzing video {video_id}: {} views, {} likes, {} comments ({} fetched)",
        video.view_count,
        video.like_count,
        video.comment_count,
        comments.len()
    );

    let metrics = calculate_engagement(video.view_count, video.like_count, video.comment_count);
    let sentiment = analyze_sentiment(&comments, scorer);
    let tags = analyze_tags(video.tags.as_slice());
    let timeline = project_timeline(
        video.published_at,
        Utc::now(),
        video.view_count,
        video.like_count,
        video.comment_count,
    );

    Ok(VideoPerformance {
        video,
        metrics,
        sentiment,
        tags,
        timeline,
    })
}
