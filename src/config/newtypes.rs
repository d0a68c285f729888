//! Strongly-typed configuration values.
//!
//! Raw strings are validated once, at construction, so the rest of the
//! crate can pass these wrappers around without re-checking them.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A DCM API access key, guaranteed non-empty.
///
/// ```rust
/// use dcm_api::AccessKey;
///
/// let key = AccessKey::new("ABCDEF123").unwrap();
/// assert_eq!(key.as_ref(), "ABCDEF123");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessKey`] when given an empty string.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyAccessKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for AccessKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for AccessKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccessKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(de::Error::custom)
    }
}

/// A DCM API secret key, guaranteed non-empty.
///
/// The secret never appears in debug output: `{:?}` prints
/// `SecretKey(*****)` so the value cannot leak through logging.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecretKey`] when given an empty string.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptySecretKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for SecretKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(*****)")
    }
}

/// The base URL of a DCM deployment.
///
/// Construction checks for an alphabetic scheme and a non-empty host, and
/// strips any trailing slash so request paths can always be joined with a
/// single `/`.
///
/// ```rust
/// use dcm_api::Endpoint;
///
/// let endpoint = Endpoint::new("https://dcm.example.com/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://dcm.example.com");
/// assert_eq!(endpoint.host_name(), Some("dcm.example.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    scheme_len: usize,
    host_len: usize,
}

impl Endpoint {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] when the URL has no
    /// `scheme://host` shape.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        // The host runs up to the first port, path, query, or fragment
        // delimiter.
        let host_len = rest
            .find([':', '/', '?', '#'])
            .unwrap_or(rest.len());
        if host_len == 0 {
            return Err(invalid());
        }

        let scheme_len = scheme.len();
        Ok(Self {
            url,
            scheme_len,
            host_len,
        })
    }

    /// The scheme, e.g. `https`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_len]
    }

    /// The host portion, e.g. `dcm.example.com`.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let start = self.scheme_len + "://".len();
        let host = &self.url[start..start + self.host_len];
        (!host.is_empty()).then_some(host)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for Endpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_key_rejects_empty() {
        assert!(matches!(AccessKey::new(""), Err(ConfigError::EmptyAccessKey)));
    }

    #[test]
    fn test_access_key_round_trips_through_serde() {
        let key = AccessKey::new("ABCDEF123").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#""ABCDEF123""#);
        let back: AccessKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_secret_key_rejects_empty() {
        assert!(matches!(SecretKey::new(""), Err(ConfigError::EmptySecretKey)));
    }

    #[test]
    fn test_secret_key_masks_debug_output() {
        let secret = SecretKey::new("super-secret-value").unwrap();
        let debug = format!("{secret:?}");
        assert_eq!(debug, "SecretKey(*****)");
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_endpoint_accepts_full_url() {
        let endpoint = Endpoint::new("https://dcm.example.com/api/enstratus/2012-06-15").unwrap();
        assert_eq!(endpoint.scheme(), "https");
        assert_eq!(endpoint.host_name(), Some("dcm.example.com"));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let endpoint = Endpoint::new("https://dcm.example.com/").unwrap();
        assert_eq!(endpoint.as_ref(), "https://dcm.example.com");
    }

    #[test]
    fn test_endpoint_rejects_missing_scheme() {
        assert!(matches!(
            Endpoint::new("dcm.example.com"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_rejects_empty_host() {
        assert!(matches!(
            Endpoint::new("https://"),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_endpoint_with_port() {
        let endpoint = Endpoint::new("http://localhost:16443").unwrap();
        assert_eq!(endpoint.scheme(), "http");
        assert_eq!(endpoint.host_name(), Some("localhost"));
    }
}
