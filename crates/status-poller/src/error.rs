use thiserror::Error;

/// Errors raised while fetching one video's generation status.
///
/// Every variant is recoverable: the poll loop logs it and schedules the
/// next attempt after the fixed interval. A `failed` status from the server
/// is not an error here, it is a terminal decision.
#[derive(Debug, Error)]
pub enum PollError {
    /// The status endpoint answered with a non-2xx code.
    #[error("status endpoint returned HTTP {status}")]
    Http { status: reqwest::StatusCode },

    /// The request never produced a usable response.
    #[error("status request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("invalid status payload: {0}")]
    Parse(#[from] serde_json::Error),
}
