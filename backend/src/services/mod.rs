pub mod analytics_service;
pub mod channel_service;
pub mod sentiment;
pub mod url_service;
pub mod video_service;
pub mod youtube_client;
