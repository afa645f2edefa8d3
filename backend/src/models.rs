use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration: String,         // ISO-8601, e.g. PT4M13S
    pub duration_seconds: i64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub like_count: u64,
}

/// Interaction ratios of a single video, all in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub engagement_rate: f64,
    pub like_rate: f64,
    pub comment_rate: f64,
    pub overall_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredComment {
    pub author: String,
    pub text: String,
    pub like_count: u64,
    pub polarity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub total_comments: usize,
    pub most_negative: Vec<ScoredComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: DateTime<Utc>,
    pub estimated_views: u64,
    pub estimated_engagement: f64,
}

/// Modelled view accumulation between upload and now. The public API exposes
/// no historical series, so every point here is an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineProjection {
    pub estimated: bool,
    pub days_active: i64,
    pub average_daily_views: f64,
    pub average_daily_likes: f64,
    pub average_daily_comments: f64,
    pub points: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAnalysis {
    pub total_tags: usize,
    pub unique_tags: usize,
    pub top_tags: Vec<(String, usize)>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadTrend {
    #[serde(rename = "Increasing frequency")]
    Increasing,
    #[serde(rename = "Decreasing frequency")]
    Decreasing,
    #[serde(rename = "Stable")]
    Stable,
    #[serde(rename = "Insufficient data")]
    InsufficientData,
    #[serde(rename = "No data available")]
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFrequencyAnalysis {
    pub total_uploads: usize,
    pub average_frequency_days: Option<f64>,
    pub trend: UploadTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewTrend {
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelTrends {
    pub top_videos: Vec<VideoSummary>,
    pub recent_average_views: f64,
    pub early_average_views: f64,
    pub view_trend: Option<ViewTrend>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoPerformance {
    pub video: VideoRecord,
    pub metrics: EngagementMetrics,
    pub sentiment: SentimentSummary,
    pub tags: TagAnalysis,
    pub timeline: TimelineProjection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoAnalytics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    #[serde(flatten)]
    pub metrics: EngagementMetrics,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelAnalytics {
    pub channel: ChannelRecord,
    pub upload_analysis: UploadFrequencyAnalysis,
    pub trends: ChannelTrends,
    pub recent_videos: Vec<VideoSummary>,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
