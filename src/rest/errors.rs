//! Error types for the resource layer.

use thiserror::Error;

use crate::clients::HttpError;

/// Errors produced while operating on API resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The server rejected the request with an error status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the server's error envelope, or the raw body.
        message: String,
    },

    /// The server returned an attribute this crate does not know about.
    ///
    /// Raised instead of silently dropping data so schema drift surfaces
    /// at the call site.
    #[error("unknown attribute `{key}` in {resource} payload")]
    UnknownAttribute {
        /// Resource type name.
        resource: &'static str,
        /// The unrecognized wire key, in snake_case form.
        key: String,
    },

    /// An operation was attempted without its required attributes set.
    #[error("{resource} requires attributes: {}", fields.join(", "))]
    MissingAttributes {
        /// Resource type name.
        resource: &'static str,
        /// Every missing attribute, not just the first.
        fields: Vec<&'static str>,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response body, expected {expected}")]
    UnexpectedBody {
        /// What the caller was looking for, e.g. `jobs[0].jobId`.
        expected: &'static str,
    },

    /// An async job did not reach a terminal state within the polling budget.
    #[error("job {job_id} still incomplete after {attempts} polls")]
    PollTimeout {
        /// The job being polled.
        job_id: u64,
        /// How many polls were made before giving up.
        attempts: u32,
    },

    /// The resource is in a state that makes the operation invalid.
    #[error("{message}")]
    State {
        /// Description of the invalid state.
        message: String,
    },

    /// The response payload could not be decoded into the resource type.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The request never produced a response.
    #[error(transparent)]
    Http(#[from] HttpError),
}
