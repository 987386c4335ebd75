use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between issuing a GET and holding a typed body.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error! status: {status} ({url})")]
    Status { status: StatusCode, url: String },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("relay envelope carried no contents")]
    Envelope,

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
