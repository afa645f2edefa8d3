//! Derived metrics over raw platform records. Everything here is pure: the
//! caller supplies the records, the scorer and the current time.

use crate::models::{
    ChannelTrends, Comment, EngagementMetrics, ScoredComment, SentimentSummary, TagAnalysis,
    TimelinePoint, TimelineProjection, UploadFrequencyAnalysis, UploadTrend, VideoRecord,
    VideoSummary, ViewTrend,
};
use crate::services::sentiment::PolarityScorer;
use crate::utils::mean;
use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

const POSITIVE_THRESHOLD: f64 = 0.1;
const NEGATIVE_THRESHOLD: f64 = -0.1;
const MAX_NEGATIVE_COMMENTS: usize = 10;

const MAX_TIMELINE_STEPS: i64 = 30;

const TREND_WINDOW: usize = 5;
const TOP_TAG_LIMIT: usize = 5;
const TOP_VIDEO_LIMIT: usize = 5;

const NO_TAGS_RECOMMENDATION: &str = "Add relevant tags to improve your video's discoverability";
const TAG_RECOMMENDATIONS: &[&str] = &[
    "Put your most important keyword in the first tag",
    "Mix broad tags with specific long-tail tags",
    "Keep every tag relevant to the video content",
];

pub fn calculate_engagement(views: u64, likes: u64, comments: u64) -> EngagementMetrics {
    if views == 0 {
        return EngagementMetrics::default();
    }

    let views = views as f64;
    let likes = likes as f64;
    let comments = comments as f64;

    EngagementMetrics {
        engagement_rate: (likes + comments) * 100.0 / views,
        like_rate: likes * 100.0 / views,
        comment_rate: comments * 100.0 / views,
        overall_score: (likes * 2.0 + comments * 3.0) * 100.0 / views,
    }
}

pub fn engagement_rate(views: u64, likes: u64, comments: u64) -> f64 {
    calculate_engagement(views, likes, comments).engagement_rate
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

pub fn classify_polarity(polarity: f64) -> Sentiment {
    if polarity > POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

pub fn analyze_sentiment(comments: &[Comment], scorer: &dyn PolarityScorer) -> SentimentSummary {
    if comments.is_empty() {
        return SentimentSummary::default();
    }

    let mut positive = 0usize;
    let mut neutral = 0usize;
    let mut negatives = Vec::new();

    for comment in comments {
        let polarity = scorer.score(&comment.text);
        match classify_polarity(polarity) {
            Sentiment::Positive => positive += 1,
            Sentiment::Neutral => neutral += 1,
            Sentiment::Negative => negatives.push(ScoredComment {
                author: comment.author.clone(),
                text: comment.text.clone(),
                like_count: comment.like_count,
                polarity,
            }),
        }
    }

    let total = comments.len() as f64;
    let negative_count = negatives.len();

    // sort_by is stable, equal scores keep their relevance order
    negatives.sort_by(|a, b| a.polarity.partial_cmp(&b.polarity).unwrap_or(Ordering::Equal));
    negatives.truncate(MAX_NEGATIVE_COMMENTS);

    SentimentSummary {
        positive: positive as f64 * 100.0 / total,
        negative: negative_count as f64 * 100.0 / total,
        neutral: neutral as f64 * 100.0 / total,
        total_comments: comments.len(),
        most_negative: negatives,
    }
}

/// Extrapolates a front-loaded view curve between upload and `now`.
///
/// Emits `min(30, days_active) + 1` evenly spaced points. At progress `r` the
/// cumulative views are `views * (1 - (1 - r)^2)`, so the first point is 0 and
/// the last one equals `views`. A video uploaded today yields only the start
/// point.
pub fn project_timeline(
    published_at: DateTime<Utc>,
    now: DateTime<Utc>,
    views: u64,
    likes: u64,
    comments: u64,
) -> TimelineProjection {
    let elapsed = (now - published_at).max(Duration::zero());
    let days_active = elapsed.num_days();
    let divisor = days_active.max(1) as f64;
    let interactions = likes as f64 + comments as f64;

    let steps = days_active.min(MAX_TIMELINE_STEPS);
    let elapsed_ms = elapsed.num_milliseconds() as f64;

    let points = (0..=steps)
        .map(|step| {
            let progress = if steps == 0 {
                0.0
            } else {
                step as f64 / steps as f64
            };
            let estimated = views as f64 * (1.0 - (1.0 - progress).powi(2));

            TimelinePoint {
                date: published_at + Duration::milliseconds((elapsed_ms * progress) as i64),
                estimated_views: estimated.round() as u64,
                estimated_engagement: interactions / estimated.max(1.0) * 100.0,
            }
        })
        .collect();

    TimelineProjection {
        estimated: true,
        days_active,
        average_daily_views: views as f64 / divisor,
        average_daily_likes: likes as f64 / divisor,
        average_daily_comments: comments as f64 / divisor,
        points,
    }
}

/// Mean gap between consecutive uploads plus a cadence trend.
///
/// The trend compares the first five gaps with the last five, regardless of
/// how many uploads there are. With fewer than five gaps both windows are the
/// overall mean and the trend is stable.
pub fn analyze_upload_frequency(published: &[DateTime<Utc>]) -> UploadFrequencyAnalysis {
    let total_uploads = published.len();
    if total_uploads < 2 {
        return UploadFrequencyAnalysis {
            total_uploads,
            average_frequency_days: None,
            trend: if total_uploads == 0 {
                UploadTrend::NoData
            } else {
                UploadTrend::InsufficientData
            },
        };
    }

    let mut dates = published.to_vec();
    dates.sort();

    let gaps: Vec<f64> = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days() as f64)
        .collect();
    let average = mean(&gaps);

    let (old, recent) = if gaps.len() >= TREND_WINDOW {
        (
            mean(&gaps[..TREND_WINDOW]),
            mean(&gaps[gaps.len() - TREND_WINDOW..]),
        )
    } else {
        (average, average)
    };

    // shorter recent gaps mean more frequent uploads
    let trend = match recent.partial_cmp(&old) {
        Some(Ordering::Less) => UploadTrend::Increasing,
        Some(Ordering::Greater) => UploadTrend::Decreasing,
        _ => UploadTrend::Stable,
    };

    UploadFrequencyAnalysis {
        total_uploads,
        average_frequency_days: Some(average),
        trend,
    }
}

pub fn analyze_tags<S: AsRef<str>>(tags: &[S]) -> TagAnalysis {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for tag in tags {
        let tag = tag.as_ref();
        match positions.get(tag) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(tag, counts.len());
                counts.push((tag.to_string(), 1));
            }
        }
    }

    let unique_tags = counts.len();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_TAG_LIMIT);

    let recommendations = if tags.is_empty() {
        vec![NO_TAGS_RECOMMENDATION.to_string()]
    } else {
        TAG_RECOMMENDATIONS.iter().map(|r| r.to_string()).collect()
    };

    TagAnalysis {
        total_tags: tags.len(),
        unique_tags,
        top_tags: counts,
        recommendations,
    }
}

pub fn summarize_video(video: &VideoRecord) -> VideoSummary {
    VideoSummary {
        id: video.id.clone(),
        title: video.title.clone(),
        published_at: video.published_at,
        views: video.view_count,
        likes: video.like_count,
        comments: video.comment_count,
        engagement_rate: engagement_rate(video.view_count, video.like_count, video.comment_count),
    }
}

fn average_views<'a>(videos: impl Iterator<Item = &'a VideoRecord>) -> f64 {
    let views: Vec<f64> = videos.map(|v| v.view_count as f64).collect();
    mean(&views)
}

/// Top videos by views and whether recent uploads outperform the earliest ones.
pub fn summarize_channel_trends(videos: &[VideoRecord]) -> ChannelTrends {
    let mut by_views: Vec<&VideoRecord> = videos.iter().collect();
    by_views.sort_by(|a, b| b.view_count.cmp(&a.view_count));

    let mut by_date: Vec<&VideoRecord> = videos.iter().collect();
    by_date.sort_by_key(|v| v.published_at);

    let early_average_views = average_views(by_date.iter().take(TREND_WINDOW).copied());
    let recent_average_views = average_views(by_date.iter().rev().take(TREND_WINDOW).copied());

    let view_trend = if videos.is_empty() {
        None
    } else if recent_average_views > early_average_views {
        Some(ViewTrend::Increasing)
    } else {
        Some(ViewTrend::Decreasing)
    };

    ChannelTrends {
        top_videos: by_views
            .into_iter()
            .take(TOP_VIDEO_LIMIT)
            .map(summarize_video)
            .collect(),
        recent_average_views,
        early_average_views,
        view_trend,
    }
}

/// The `limit` most recently published videos, newest first.
pub fn recent_videos(videos: &[VideoRecord], limit: usize) -> Vec<VideoSummary> {
    let mut by_date: Vec<&VideoRecord> = videos.iter().collect();
    by_date.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    by_date.into_iter().take(limit).map(summarize_video).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedScores(HashMap<&'static str, f64>);

    impl PolarityScorer for FixedScores {
        fn score(&self, text: &str) -> f64 {
            self.0.get(text).copied().unwrap_or(0.0)
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()
    }

    fn days_after(start: DateTime<Utc>, offsets: &[i64]) -> Vec<DateTime<Utc>> {
        offsets
            .iter()
            .map(|&d| start + Duration::days(d))
            .collect()
    }

    fn comment(text: &str) -> Comment {
        Comment {
            author: format!("author of {text}"),
            text: text.to_string(),
            published_at: day(1),
            like_count: 0,
        }
    }

    fn video(id: &str, views: u64, published_at: DateTime<Utc>) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: format!("Video {id}"),
            description: String::new(),
            channel_id: "UC123".to_string(),
            channel_title: "Channel".to_string(),
            published_at,
            view_count: views,
            like_count: views / 10,
            comment_count: views / 100,
            duration: "PT1M".to_string(),
            duration_seconds: 60,
            tags: vec![],
        }
    }

    #[test]
    fn engagement_is_zero_without_views() {
        assert_eq!(engagement_rate(0, 10, 5), 0.0);
        assert_eq!(calculate_engagement(0, 10, 5), EngagementMetrics::default());
    }

    #[test]
    fn engagement_for_known_counts() {
        let metrics = calculate_engagement(1000, 50, 10);
        assert_eq!(metrics.engagement_rate, 6.0);
        assert_eq!(metrics.like_rate, 5.0);
        assert_eq!(metrics.comment_rate, 1.0);
        assert_eq!(metrics.overall_score, 13.0);
    }

    #[test]
    fn overall_score_never_below_like_rate() {
        for (views, likes, comments) in [(1, 0, 0), (7, 3, 0), (250, 13, 99), (10_000, 10_000, 1)] {
            let metrics = calculate_engagement(views, likes, comments);
            assert!(metrics.overall_score >= metrics.like_rate);
        }
    }

    #[test]
    fn classifies_around_thresholds() {
        assert_eq!(classify_polarity(0.5), Sentiment::Positive);
        assert_eq!(classify_polarity(0.1), Sentiment::Neutral);
        assert_eq!(classify_polarity(-0.1), Sentiment::Neutral);
        assert_eq!(classify_polarity(-0.11), Sentiment::Negative);
    }

    #[test]
    fn sentiment_of_no_comments_is_all_zero() {
        let summary = analyze_sentiment(&[], &FixedScores(HashMap::new()));
        assert_eq!(summary.positive, 0.0);
        assert_eq!(summary.negative, 0.0);
        assert_eq!(summary.neutral, 0.0);
        assert!(summary.most_negative.is_empty());
    }

    #[test]
    fn sentiment_percentages_sum_to_hundred() {
        let scorer = FixedScores(HashMap::from([("love", 0.8), ("meh", 0.0), ("bad", -0.6)]));
        let comments: Vec<Comment> = ["love", "meh", "bad", "love", "bad", "bad", "meh"]
            .iter()
            .map(|t| comment(t))
            .collect();

        let summary = analyze_sentiment(&comments, &scorer);
        let total = summary.positive + summary.negative + summary.neutral;
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(summary.total_comments, 7);
        assert!((summary.negative - 300.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn most_negative_comments_are_sorted_and_capped() {
        let scorer = FixedScores(HashMap::from([
            ("awful", -0.9),
            ("bad", -0.5),
            ("worse", -0.7),
            ("fine", 0.05),
        ]));
        let mut comments = vec![comment("fine"), comment("bad"), comment("awful")];
        comments.extend((0..12).map(|_| comment("worse")));

        let summary = analyze_sentiment(&comments, &scorer);
        assert_eq!(summary.most_negative.len(), 10);
        assert_eq!(summary.most_negative[0].text, "awful");
        assert!(summary.most_negative[1..].iter().all(|c| c.text == "worse"));
    }

    #[test]
    fn equal_polarity_keeps_encounter_order() {
        let scorer = FixedScores(HashMap::from([("first", -0.5), ("second", -0.5), ("worst", -0.9)]));
        let comments = vec![comment("first"), comment("worst"), comment("second")];

        let texts: Vec<String> = analyze_sentiment(&comments, &scorer)
            .most_negative
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["worst", "first", "second"]);
    }

    #[test]
    fn timeline_starts_at_zero_and_ends_at_total() {
        let timeline = project_timeline(day(1), day(11), 5000, 200, 50);

        assert!(timeline.estimated);
        assert_eq!(timeline.days_active, 10);
        assert_eq!(timeline.points.len(), 11);
        assert_eq!(timeline.points[0].estimated_views, 0);
        assert_eq!(timeline.points[0].date, day(1));
        assert_eq!(timeline.points[10].estimated_views, 5000);
        assert_eq!(timeline.points[10].date, day(11));
        assert_eq!(timeline.average_daily_views, 500.0);
        assert!((timeline.points[10].estimated_engagement - 5.0).abs() < 1e-9);
    }

    #[test]
    fn timeline_handles_counts_near_u64_max() {
        let timeline = project_timeline(day(1), day(3), u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(timeline.points.len(), 3);
        assert!(timeline.points[2].estimated_engagement.is_finite());
        assert!((timeline.points[2].estimated_engagement - 200.0).abs() < 1e-9);
    }

    #[test]
    fn timeline_views_never_decrease() {
        let timeline = project_timeline(day(1), day(20), 12345, 1, 1);
        assert!(timeline
            .points
            .windows(2)
            .all(|w| w[0].estimated_views <= w[1].estimated_views));
    }

    #[test]
    fn timeline_caps_at_thirty_one_points() {
        let published = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let timeline = project_timeline(published, day(1), 1_000_000, 0, 0);
        assert_eq!(timeline.points.len(), 31);
        assert_eq!(timeline.points[30].estimated_views, 1_000_000);
    }

    #[test]
    fn same_day_video_has_single_start_point() {
        let published = day(5);
        let timeline = project_timeline(published, published + Duration::hours(3), 300, 30, 3);

        assert_eq!(timeline.days_active, 0);
        assert_eq!(timeline.points.len(), 1);
        assert_eq!(timeline.points[0].estimated_views, 0);
        assert_eq!(timeline.average_daily_views, 300.0);
    }

    #[test]
    fn upload_frequency_without_enough_videos() {
        let empty = analyze_upload_frequency(&[]);
        assert_eq!(empty.trend, UploadTrend::NoData);
        assert_eq!(empty.average_frequency_days, None);

        let single = analyze_upload_frequency(&[day(1)]);
        assert_eq!(single.trend, UploadTrend::InsufficientData);
        assert_eq!(single.average_frequency_days, None);
    }

    #[test]
    fn few_gaps_are_stable() {
        let analysis = analyze_upload_frequency(&days_after(day(1), &[9, 0, 2, 5]));
        assert_eq!(analysis.total_uploads, 4);
        assert_eq!(analysis.average_frequency_days, Some(3.0));
        assert_eq!(analysis.trend, UploadTrend::Stable);
    }

    #[test]
    fn shrinking_gaps_increase_frequency() {
        // gaps: 10, 10, 10, 10, 10, 2, 2, 2, 2, 2
        let analysis =
            analyze_upload_frequency(&days_after(day(1), &[0, 10, 20, 30, 40, 50, 52, 54, 56, 58, 60]));
        assert_eq!(analysis.average_frequency_days, Some(6.0));
        assert_eq!(analysis.trend, UploadTrend::Increasing);
    }

    #[test]
    fn growing_gaps_decrease_frequency() {
        let analysis = analyze_upload_frequency(&days_after(day(1), &[0, 1, 2, 3, 4, 5, 15, 25, 35, 45, 55]));
        assert_eq!(analysis.trend, UploadTrend::Decreasing);
    }

    #[test]
    fn overlapping_windows_with_even_gaps_are_stable() {
        let analysis = analyze_upload_frequency(&days_after(day(1), &[0, 7, 14, 21, 28, 35, 42]));
        assert_eq!(analysis.average_frequency_days, Some(7.0));
        assert_eq!(analysis.trend, UploadTrend::Stable);
    }

    #[test]
    fn counts_tags() {
        let analysis = analyze_tags(&["a", "a", "b"]);
        assert_eq!(
            analysis.top_tags,
            vec![("a".to_string(), 2), ("b".to_string(), 1)]
        );
        assert_eq!(analysis.total_tags, 3);
        assert_eq!(analysis.unique_tags, 2);
        assert_eq!(analysis.recommendations.len(), TAG_RECOMMENDATIONS.len());
    }

    #[test]
    fn no_tags_gets_one_recommendation() {
        let analysis = analyze_tags::<String>(&[]);
        assert_eq!(analysis.total_tags, 0);
        assert!(analysis.top_tags.is_empty());
        assert_eq!(analysis.recommendations, vec![NO_TAGS_RECOMMENDATION]);
    }

    #[test]
    fn tag_ties_keep_first_seen_order_and_cap_at_five() {
        let tags = ["z", "y", "x", "w", "v", "u", "y"];
        let analysis = analyze_tags(&tags);
        let top: Vec<&str> = analysis.top_tags.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(top, vec!["y", "z", "x", "w", "v"]);
        assert_eq!(analysis.unique_tags, 6);
    }

    #[test]
    fn channel_trend_rises_when_recent_uploads_do_better() {
        let videos: Vec<VideoRecord> = (1..=12)
            .map(|d| video(&format!("v{d}"), d as u64 * 100, day(d)))
            .collect();

        let trends = summarize_channel_trends(&videos);
        assert_eq!(trends.view_trend, Some(ViewTrend::Increasing));
        assert_eq!(trends.early_average_views, 300.0);
        assert_eq!(trends.recent_average_views, 1000.0);

        let top: Vec<&str> = trends.top_videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(top, vec!["v12", "v11", "v10", "v9", "v8"]);
        assert!((trends.top_videos[0].engagement_rate - 11.0).abs() < 1e-9);
    }

    #[test]
    fn channel_trend_falls_otherwise() {
        let videos = vec![video("old", 900, day(1)), video("new", 100, day(2))];
        assert_eq!(
            summarize_channel_trends(&videos).view_trend,
            Some(ViewTrend::Decreasing)
        );
        assert_eq!(summarize_channel_trends(&[]).view_trend, None);
    }

    #[test]
    fn recent_videos_are_newest_first() {
        let videos = vec![video("a", 1, day(3)), video("b", 1, day(9)), video("c", 1, day(5))];
        let ids: Vec<String> = recent_videos(&videos, 2).into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
