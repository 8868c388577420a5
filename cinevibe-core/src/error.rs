use thiserror::Error;

/// Failure to construct one of the HTTP providers.
#[derive(Error, Debug)]
pub enum ClientBuildError {
    /// A configured value (API key, user agent) cannot be sent as a header.
    #[error("Invalid header value for {name}: {source}")]
    InvalidHeader {
        /// Header the value was destined for.
        name: &'static str,
        /// Underlying rejection.
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    /// The HTTP client itself could not be built (TLS backend, etc.).
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result alias for provider construction.
pub type Result<T> = std::result::Result<T, ClientBuildError>;
