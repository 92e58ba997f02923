pub mod axcient;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure categories at the fetch boundary. Absent nested fields are not
/// errors; wire types model them as `Option` and views render fallbacks.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: StatusCode, body: String },
    #[error("failed to decode response body: {0}")]
    Parse(#[source] serde_json::Error),
}
