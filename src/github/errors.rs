use thiserror::Error;

/// Failure of a single GitHub API call. Callers degrade on any variant
/// (missing languages, missing README, empty gallery) instead of surfacing
/// the error to the HTTP client; the variants exist so call sites and logs
/// can tell a timeout from a malformed body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("malformed body: {0}")]
    MalformedBody(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl ApiError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_request() {
            // DNS, connection errors
            Self::Transport(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}
