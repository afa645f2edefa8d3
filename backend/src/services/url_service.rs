use crate::error::{AnalyticsError, AnalyticsResult};
use crate::services::youtube_client::PlatformClient;
use log::{debug, info};
use url::Url;

const INVALID_URL: &str = "Invalid YouTube URL";
const INVALID_CHANNEL_URL: &str = "Invalid YouTube channel URL format";

/// Every URL shape the analyzer understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    /// https://youtu.be/VIDEO_ID
    ShortLink(String),
    /// https://www.youtube.com/watch?v=VIDEO_ID
    WatchQuery(String),
    /// https://www.youtube.com/channel/CHANNEL_ID
    ChannelDirect(String),
    /// https://www.youtube.com/@handle
    ChannelHandle(String),
    /// https://www.youtube.com/c/name or /user/name
    ChannelCustom(String),
    /// A YouTube host with an unrecognised path.
    Invalid,
    /// Not a YouTube URL at all.
    Foreign,
}

fn parse_url(input: &str) -> Option<Url> {
    let input = input.trim();
    Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{input}")))
        .ok()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub fn classify_url(input: &str) -> UrlKind {
    let Some(parsed_url) = parse_url(input) else {
        return UrlKind::Foreign;
    };
    let Some(host) = parsed_url.host_str() else {
        return UrlKind::Foreign;
    };

    let segments: Vec<&str> = parsed_url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match host {
        "youtu.be" | "www.youtu.be" => segments
            .first()
            .and_then(|id| non_empty(id))
            .map(UrlKind::ShortLink)
            .unwrap_or(UrlKind::Invalid),
        "www.youtube.com" | "youtube.com" | "m.youtube.com" => match segments.as_slice() {
            ["watch"] => parsed_url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .and_then(|(_, value)| non_empty(&value))
                .map(UrlKind::WatchQuery)
                .unwrap_or(UrlKind::Invalid),
            [first, ..] if first.starts_with('@') && first.len() > 1 => {
                UrlKind::ChannelHandle(first.to_string())
            }
            ["channel", id, ..] => UrlKind::ChannelDirect(id.to_string()),
            ["c" | "user", name, ..] => UrlKind::ChannelCustom(name.to_string()),
            _ => UrlKind::Invalid,
        },
        _ => UrlKind::Foreign,
    }
}

pub fn extract_video_id(video_url: &str) -> AnalyticsResult<String> {
    match classify_url(video_url) {
        UrlKind::ShortLink(id) | UrlKind::WatchQuery(id) => Ok(id),
        _ => Err(AnalyticsError::InvalidUrl(INVALID_URL)),
    }
}

/// Resolve a channel URL to its stable channel id. Handles and custom names
/// need a search request; `/channel/<id>` URLs do not touch the network.
pub async fn extract_channel_id(
    platform: &dyn PlatformClient,
    channel_url: &str,
) -> AnalyticsResult<String> {
    let query = match classify_url(channel_url) {
        UrlKind::ChannelDirect(id) => return Ok(id),
        UrlKind::ChannelHandle(query) | UrlKind::ChannelCustom(query) => query,
        UrlKind::Foreign => return Err(AnalyticsError::InvalidUrl(INVALID_URL)),
        _ => return Err(AnalyticsError::InvalidUrl(INVALID_CHANNEL_URL)),
    };

    debug!("Searching channel for {query}");
    match platform.search_channel_by_query(&query).await {
        Ok(Some(channel_id)) => {
            info!("Resolved {query} to channel {channel_id}");
            Ok(channel_id)
        }
        Ok(None) => Err(AnalyticsError::Resolution("Channel not found".to_string())),
        Err(e) => Err(AnalyticsError::Resolution(e.to_string())),
    }
}
