pub mod catchers;
pub mod channel;
pub mod page;
pub mod video;

pub use channel::*;
pub use page::*;
pub use video::*;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Takes the first submitted value of a form field. Blank and absent fields
/// are both treated as missing.
pub(crate) fn required(values: Vec<String>, field: &'static str) -> AnalyticsResult<String> {
    match values.into_iter().next().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AnalyticsError::MissingField(field)),
    }
}
