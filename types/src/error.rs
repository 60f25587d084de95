use thiserror::Error;

/// Message shown to the user for every fetch failure, whatever its kind.
pub const FETCH_FAILED_MESSAGE: &str = "Không thể lấy nội dung từ URL này.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("index {index} out of range for {len} pairs")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid pair JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why acquiring page text failed.
///
/// Every kind collapses to [`FETCH_FAILED_MESSAGE`] for display; the kind and
/// detail are kept for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    /// Configured limit, in milliseconds.
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("proxy returned HTTP {0}")]
    Status(u16),
    #[error("could not decode response body: {0}")]
    Decode(String),
    #[error("page contained no text")]
    EmptyContent,
}

impl FetchFailure {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }

    /// Short machine-friendly tag, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
            Self::EmptyContent => "empty_content",
        }
    }
}
