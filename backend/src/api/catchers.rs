use crate::error::AnalyticsError;
use rocket::{catch, Request};

/// The form guard forwards with 415 when the body is not a form at all
/// (no Content-Type, JSON, ...) and fails with 422 when it cannot be parsed.
/// Both mean the URL field never arrived.
fn missing_url_field(req: &Request<'_>) -> AnalyticsError {
    match req.uri().path().as_str() {
        "/analyze-channel" => AnalyticsError::MissingField("Channel URL"),
        _ => AnalyticsError::MissingField("Video URL"),
    }
}

#[catch(415)]
pub fn unsupported_form(req: &Request<'_>) -> AnalyticsError {
    missing_url_field(req)
}

#[catch(422)]
pub fn unprocessable_form(req: &Request<'_>) -> AnalyticsError {
    missing_url_field(req)
}
