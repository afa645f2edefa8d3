use crate::models::ErrorResponse;
use log::{error, warn};
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::Response;
use std::io::Cursor;
use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A required form field was absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidUrl(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("YouTube API request failed: {0}")]
    Upstream(String),

    /// Handle or custom-name lookup did not yield a channel.
    #[error("Error finding channel: {0}")]
    Resolution(String),
}

impl AnalyticsError {
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    // Only input validation is reported as a client error; everything else,
    // including malformed URLs and failed lookups, surfaces as a 500.
    pub fn status(&self) -> Status {
        match self {
            AnalyticsError::MissingField(_) => Status::BadRequest,
            AnalyticsError::InvalidUrl(_)
            | AnalyticsError::NotFound(_)
            | AnalyticsError::Upstream(_)
            | AnalyticsError::Resolution(_) => Status::InternalServerError,
        }
    }
}

impl From<reqwest::Error> for AnalyticsError {
    fn from(e: reqwest::Error) -> Self {
        AnalyticsError::Upstream(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for AnalyticsError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status == Status::BadRequest {
            warn!("Rejected request to {}: {self}", request.uri());
        } else {
            error!("Request to {} failed: {self:?}", request.uri());
        }

        let json = serde_json::to_string(&ErrorResponse {
            error: self.to_string(),
        })
        .map_err(|_| Status::InternalServerError)?;

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_fields_are_client_errors() {
        assert_eq!(
            AnalyticsError::MissingField("Video URL").status(),
            Status::BadRequest
        );
        assert_eq!(
            AnalyticsError::InvalidUrl("Invalid YouTube URL").status(),
            Status::InternalServerError
        );
        assert_eq!(
            AnalyticsError::Resolution("Channel not found".into()).status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn messages_match_the_error_body() {
        assert_eq!(
            AnalyticsError::MissingField("Channel URL").to_string(),
            "Channel URL is required"
        );
        assert_eq!(
            AnalyticsError::NotFound("Video").to_string(),
            "Video not found"
        );
        assert_eq!(
            AnalyticsError::Resolution("Channel not found".into()).to_string(),
            "Error finding channel: Channel not found"
        );
    }
}
