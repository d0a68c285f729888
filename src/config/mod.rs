//! Client configuration.
//!
//! A [`DcmConfig`] bundles everything a client needs to talk to a DCM
//! deployment: the signing key pair ([`AccessKey`] / [`SecretKey`]),
//! the [`Endpoint`] to send requests to, the base path embedded in
//! signatures, and transport options. It is assembled through
//! [`DcmConfigBuilder`].
//!
//! # Example
//!
//! ```rust
//! use dcm_api::{DcmConfig, AccessKey, SecretKey, Endpoint};
//!
//! let config = DcmConfig::builder()
//!     .access_key(AccessKey::new("my-access-key").unwrap())
//!     .secret_key(SecretKey::new("my-secret").unwrap())
//!     .endpoint(Endpoint::new("https://dcm.example.com/api/enstratus/2012-06-15").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccessKey, Endpoint, SecretKey};

use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base path used in the signing string.
///
/// The signed path is `{base_path}/{resource_path}` even when the endpoint
/// URL already carries the API prefix; the two are configured independently
/// because proxied deployments may diverge.
pub const DEFAULT_BASE_PATH: &str = "/api/enstratus/2012-06-15";

/// Configuration for the DCM API SDK.
///
/// This struct holds all configuration needed for SDK operations: the API
/// key pair used for request signing, the endpoint to talk to, the base
/// path embedded in the signature, and transport options.
///
/// The config is `Clone`, `Send`, and `Sync`, so one instance can back
/// any number of concurrent clients.
///
/// # Example
///
/// ```rust
/// use dcm_api::{DcmConfig, AccessKey, SecretKey, Endpoint};
///
/// let config = DcmConfig::builder()
///     .access_key(AccessKey::new("key").unwrap())
///     .secret_key(SecretKey::new("secret").unwrap())
///     .endpoint(Endpoint::new("https://dcm.example.com").unwrap())
///     .ssl_verify(false)
///     .build()
///     .unwrap();
///
/// assert!(!config.ssl_verify());
/// ```
#[derive(Clone, Debug)]
pub struct DcmConfig {
    access_key: AccessKey,
    secret_key: SecretKey,
    endpoint: Endpoint,
    base_path: String,
    user_agent: String,
    ssl_verify: bool,
}

impl DcmConfig {
    /// Creates a new builder for constructing a `DcmConfig`.
    #[must_use]
    pub fn builder() -> DcmConfigBuilder {
        DcmConfigBuilder::new()
    }

    /// Returns the access key.
    #[must_use]
    pub const fn access_key(&self) -> &AccessKey {
        &self.access_key
    }

    /// Returns the secret key.
    #[must_use]
    pub const fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the base path used in the signing string.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the User-Agent string sent with (and signed into) every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn ssl_verify(&self) -> bool {
        self.ssl_verify
    }
}

// Verify DcmConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DcmConfig>();
};

/// Builder for constructing [`DcmConfig`] instances.
///
/// Required fields are `access_key`, `secret_key`, and `endpoint`. All other
/// fields have sensible defaults.
///
/// # Defaults
///
/// - `base_path`: [`DEFAULT_BASE_PATH`]
/// - `user_agent`: `DCM API Library v{version} | Rust {rust-version}`
/// - `ssl_verify`: `true`
///
/// # Example
///
/// ```rust
/// use dcm_api::{DcmConfig, AccessKey, SecretKey, Endpoint};
///
/// let config = DcmConfig::builder()
///     .access_key(AccessKey::new("key").unwrap())
///     .secret_key(SecretKey::new("secret").unwrap())
///     .endpoint(Endpoint::new("https://dcm.example.com").unwrap())
///     .base_path("/api/enstratus/2012-06-15")
///     .user_agent("my-tool/2.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct DcmConfigBuilder {
    access_key: Option<AccessKey>,
    secret_key: Option<SecretKey>,
    endpoint: Option<Endpoint>,
    base_path: Option<String>,
    user_agent: Option<String>,
    ssl_verify: Option<bool>,
}

impl DcmConfigBuilder {
    /// Equivalent to `Self::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access key (required).
    #[must_use]
    pub fn access_key(mut self, key: AccessKey) -> Self {
        self.access_key = Some(key);
        self
    }

    /// Sets the secret key (required).
    #[must_use]
    pub fn secret_key(mut self, key: SecretKey) -> Self {
        self.secret_key = Some(key);
        self
    }

    /// Sets the endpoint URL (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the base path used in the signing string.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Sets the User-Agent string.
    ///
    /// The value participates in the request signature, so client and server
    /// must agree on it byte for byte.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets whether TLS certificates are verified.
    ///
    /// DCM installations behind self-signed certificates need this off.
    #[must_use]
    pub const fn ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = Some(verify);
        self
    }

    /// Builds the [`DcmConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `access_key`,
    /// `secret_key`, or `endpoint` are not set.
    pub fn build(self) -> Result<DcmConfig, ConfigError> {
        let access_key = self
            .access_key
            .ok_or(ConfigError::MissingRequiredField { field: "access_key" })?;
        let secret_key = self
            .secret_key
            .ok_or(ConfigError::MissingRequiredField { field: "secret_key" })?;
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;

        let user_agent = self.user_agent.unwrap_or_else(|| {
            let rust_version = env!("CARGO_PKG_RUST_VERSION");
            format!("DCM API Library v{SDK_VERSION} | Rust {rust_version}")
        });

        Ok(DcmConfig {
            access_key,
            secret_key,
            endpoint,
            base_path: self
                .base_path
                .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
            user_agent,
            ssl_verify: self.ssl_verify.unwrap_or(true),
        })
    }
}
