use thiserror::Error;

/// Error type shared by all HTTP clients in this crate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, TLS, body decode).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// A configured base URL could not be parsed or joined.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Build a `Status` error from a response, consuming it.
    pub(crate) fn from_status(resp: &reqwest::Response) -> Self {
        Self::Status {
            status: resp.status(),
            url: resp.url().to_string(),
        }
    }
}
