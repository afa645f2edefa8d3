use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{ChannelRecord, Comment, VideoRecord};
use crate::utils::{parse_count, parse_iso8601, parse_iso8601_duration_to_seconds, str_field};
use chrono::{DateTime, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

// Hard per-request limits of the Data API.
const MAX_COMMENT_PAGE: usize = 100;
const MAX_PLAYLIST_PAGE: usize = 50;

/// Read access to the video platform.
#[rocket::async_trait]
pub trait PlatformClient: Send + Sync {
    async fn fetch_video(&self, video_id: &str) -> AnalyticsResult<VideoRecord>;

    async fn fetch_channel(&self, channel_id: &str) -> AnalyticsResult<ChannelRecord>;

    /// Returns the id of the best matching channel, if any.
    async fn search_channel_by_query(&self, query: &str) -> AnalyticsResult<Option<String>>;

    async fn fetch_comment_threads(
        &self,
        video_id: &str,
        limit: usize,
    ) -> AnalyticsResult<Vec<Comment>>;

    /// Most recent uploads of a channel, newest first.
    async fn fetch_channel_uploads(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> AnalyticsResult<Vec<VideoRecord>>;
}

pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        YouTubeClient {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    // Documentation: https://developers.google.com/youtube/v3/docs
    async fn get_json(
        &self,
        resource: &str,
        params: &[(&str, &str)],
        entity: &'static str,
    ) -> AnalyticsResult<Value> {
        let url = format!("{}/{resource}", self.base_url);
        debug!("GET {url} {params:?}");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AnalyticsError::NotFound(entity));
        }
        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("no error message");
            return Err(AnalyticsError::upstream(format!("{status}: {message}")));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[rocket::async_trait]
impl PlatformClient for YouTubeClient {
    async fn fetch_video(&self, video_id: &str) -> AnalyticsResult<VideoRecord> {
        let response = self
            .get_json(
                "videos",
                &[("part", "snippet,statistics,contentDetails"), ("id", video_id)],
                "Video",
            )
            .await?;

        match response["items"].as_array().and_then(|items| items.first()) {
            Some(item) => parse_video(item),
            None => Err(AnalyticsError::NotFound("Video")),
        }
    }

    async fn fetch_channel(&self, channel_id: &str) -> AnalyticsResult<ChannelRecord> {
        let response = self
            .get_json(
                "channels",
                &[("part", "snippet,statistics,contentDetails"), ("id", channel_id)],
                "Channel",
            )
            .await?;

        let item = response["items"]
            .as_array()
            .and_then(|items| items.first())
            .ok_or(AnalyticsError::NotFound("Channel"))?;

        Ok(ChannelRecord {
            id: channel_id.to_string(),
            title: str_field(&item["snippet"]["title"]),
            description: str_field(&item["snippet"]["description"]),
            published_at: published_at(&item["snippet"])?,
            subscriber_count: parse_count(&item["statistics"]["subscriberCount"]),
            video_count: parse_count(&item["statistics"]["videoCount"]),
            view_count: parse_count(&item["statistics"]["viewCount"]),
        })
    }

    async fn search_channel_by_query(&self, query: &str) -> AnalyticsResult<Option<String>> {
        let response = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "channel"),
                    ("maxResults", "1"),
                ],
                "Channel",
            )
            .await?;

        Ok(response["items"]
            .as_array()
            .and_then(|items| items.first())
            .and_then(|item| {
                item["snippet"]["channelId"]
                    .as_str()
                    .or_else(|| item["id"]["channelId"].as_str())
            })
            .map(String::from))
    }

    async fn fetch_comment_threads(
        &self,
        video_id: &str,
        limit: usize,
    ) -> AnalyticsResult<Vec<Comment>> {
        let max_results = limit.min(MAX_COMMENT_PAGE).to_string();
        let response = self
            .get_json(
                "commentThreads",
                &[
                    ("part", "snippet"),
                    ("videoId", video_id),
                    ("maxResults", max_results.as_str()),
                    ("order", "relevance"),
                    ("textFormat", "plainText"),
                ],
                "Video",
            )
            .await?;

        let mut comments = Vec::new();
        for item in response["items"].as_array().into_iter().flatten() {
            let snippet = &item["snippet"]["topLevelComment"]["snippet"];
            comments.push(Comment {
                author: str_field(&snippet["authorDisplayName"]),
                text: str_field(&snippet["textDisplay"]),
                published_at: published_at(snippet)?,
                like_count: parse_count(&snippet["likeCount"]),
            });
        }
        Ok(comments)
    }

    async fn fetch_channel_uploads(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> AnalyticsResult<Vec<VideoRecord>> {
        let channel = self
            .get_json(
                "channels",
                &[("part", "contentDetails"), ("id", channel_id)],
                "Channel",
            )
            .await?;

        let uploads_playlist = channel["items"]
            .as_array()
            .and_then(|items| items.first())
            .and_then(|item| item["contentDetails"]["relatedPlaylists"]["uploads"].as_str())
            .ok_or(AnalyticsError::NotFound("Channel"))?
            .to_string();

        let max_results = limit.min(MAX_PLAYLIST_PAGE).to_string();
        let playlist = match self
            .get_json(
                "playlistItems",
                &[
                    ("part", "contentDetails"),
                    ("playlistId", uploads_playlist.as_str()),
                    ("maxResults", max_results.as_str()),
                ],
                "Playlist",
            )
            .await
        {
            Ok(playlist) => playlist,
            // Channels without public uploads have no uploads playlist.
            Err(AnalyticsError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let video_ids: Vec<&str> = playlist["items"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|item| item["contentDetails"]["videoId"].as_str())
            .collect();

        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = video_ids.join(",");
        let videos = self
            .get_json(
                "videos",
                &[("part", "snippet,statistics,contentDetails"), ("id", joined.as_str())],
                "Video",
            )
            .await?;

        videos["items"]
            .as_array()
            .into_iter()
            .flatten()
            .map(parse_video)
            .collect()
    }
}

fn published_at(snippet: &Value) -> AnalyticsResult<DateTime<Utc>> {
    snippet["publishedAt"]
        .as_str()
        .and_then(parse_iso8601)
        .ok_or_else(|| AnalyticsError::upstream("response is missing a valid publishedAt"))
}

fn parse_video(item: &Value) -> AnalyticsResult<VideoRecord> {
    let snippet = &item["snippet"];
    let duration = str_field(&item["contentDetails"]["duration"]);

    Ok(VideoRecord {
        id: str_field(&item["id"]),
        title: str_field(&snippet["title"]),
        description: str_field(&snippet["description"]),
        channel_id: str_field(&snippet["channelId"]),
        channel_title: str_field(&snippet["channelTitle"]),
        published_at: published_at(snippet)?,
        view_count: parse_count(&item["statistics"]["viewCount"]),
        like_count: parse_count(&item["statistics"]["likeCount"]),
        comment_count: parse_count(&item["statistics"]["commentCount"]),
        duration_seconds: parse_iso8601_duration_to_seconds(&duration),
        duration,
        tags: snippet["tags"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_video_resource() {
        let item = json!({
            "id": "abc123",
            "snippet": {
                "title": "Intro",
                "description": "desc",
                "channelId": "UC1",
                "channelTitle": "Chan",
                "publishedAt": "2024-01-01T00:00:00Z",
                "tags": ["rust", "web"]
            },
            "statistics": { "viewCount": "1000", "likeCount": "50" },
            "contentDetails": { "duration": "PT1M30S" }
        });

        let video = parse_video(&item).unwrap();
        assert_eq!(video.id, "abc123");
        assert_eq!(video.view_count, 1000);
        assert_eq!(video.like_count, 50);
        assert_eq!(video.comment_count, 0);
        assert_eq!(video.duration_seconds, 90);
        assert_eq!(video.tags, vec!["rust", "web"]);
    }

    #[test]
    fn video_without_timestamp_is_an_upstream_error() {
        let item = json!({ "id": "x", "snippet": { "title": "t" } });
        assert!(matches!(
            parse_video(&item),
            Err(AnalyticsError::Upstream(_))
        ));
    }
}
