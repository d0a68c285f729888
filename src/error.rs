//! Configuration errors.
//!
//! Everything under [`crate::config`] validates its inputs up front and
//! reports problems through [`ConfigError`]:
//!
//! ```rust
//! use dcm_api::{AccessKey, ConfigError};
//!
//! assert!(matches!(AccessKey::new(""), Err(ConfigError::EmptyAccessKey)));
//! ```

use thiserror::Error;

/// A problem with the client configuration, detected before any request
/// is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("access key must not be empty")]
    EmptyAccessKey,

    #[error("secret key must not be empty")]
    EmptySecretKey,

    /// The endpoint was not a `scheme://host` URL.
    #[error("invalid endpoint URL '{url}': expected a full URL with scheme, e.g. 'https://dcm.example.com'")]
    InvalidEndpoint {
        /// The rejected URL.
        url: String,
    },

    /// The builder was finished without a mandatory field.
    #[error("configuration field '{field}' must be set before building")]
    MissingRequiredField {
        /// Name of the unset field.
        field: &'static str,
    },
}
