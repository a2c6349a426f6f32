use thiserror::Error;

/// Failure kinds surfaced by topspot.
///
/// An empty top-items result is not an error; see
/// [`crate::spotify::top::TopItems`].
#[derive(Debug, Error)]
pub enum Error {
    /// Config file unreadable, or a section or key is missing. Fatal.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The OAuth flow could not complete: network failure, invalid
    /// credentials, or the user declined consent.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// A request against the Web API failed or returned a malformed body.
    #[error("fetch error: {0}")]
    Fetch(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}
