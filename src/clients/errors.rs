//! Error types for the HTTP transport layer.

use thiserror::Error;

/// A request was malformed before it ever reached the network.
#[derive(Debug, Error)]
pub enum InvalidApiRequestError {
    /// The HTTP method requires a body and none was provided.
    #[error("{method} requests require a body")]
    MissingBody {
        /// The offending method.
        method: &'static str,
    },
}

/// Errors produced while sending a request.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request failed local validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidApiRequestError),

    /// The underlying transport failed (connection, TLS, timeout).
    #[error(transparent)]
    Network(#[from] reqwest::Error),
}
