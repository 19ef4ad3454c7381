use thiserror::Error;

/// Errors that end a scrape early.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The site answered with something other than 200 OK.
    #[error("Response returned {0}")]
    Status(u16),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("base URL {0} cannot carry a search path")]
    BaseUrl(String),
}
