//! The HTTP client that signs and dispatches API requests.

use std::collections::HashMap;

use tracing::debug;

use crate::auth;
use crate::config::DcmConfig;

use super::errors::HttpError;
use super::http_request::{ApiRequest, HttpMethod};
use super::http_response::ApiResponse;

/// A signed HTTP client bound to one endpoint and key pair.
///
/// The client is cheap to clone; the underlying connection pool is shared
/// between clones.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    config: DcmConfig,
}

impl ApiClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: DcmConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .danger_accept_invalid_certs(!config.ssl_verify())
            .build()?;

        Ok(Self { client, config })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &DcmConfig {
        &self.config
    }

    /// Signs and sends a request, returning the parsed response.
    ///
    /// No status-based classification happens here; any status the server
    /// returns is handed back as-is.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails local
    /// validation, or [`HttpError::Network`] on transport failure.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, HttpError> {
        request.verify()?;

        let url = format!("{}/{}", self.config.endpoint().as_ref(), request.path);
        let signature = auth::sign(&self.config, request.method, &request.path);
        let details = request
            .details
            .map_or("extended", super::http_request::DetailLevel::as_str);

        debug!(
            method = %request.method,
            path = %request.path,
            "sending API request"
        );

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        builder = builder
            .header("x-esauth-access", &signature.access_key)
            .header("x-esauth-timestamp", signature.timestamp.to_string())
            .header("x-esauth-signature", &signature.signature)
            .header("x-es-details", details)
            .header("Accept", request.format.as_accept())
            .header("User-Agent", &signature.user_agent);

        if let Some(query) = &request.query {
            builder = builder.query(query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let code = response.status().as_u16();
        let headers = Self::parse_response_headers(response.headers());
        let raw = response.text().await?;

        debug!(status = code, path = %request.path, "received API response");

        Ok(ApiResponse::new(code, headers, raw))
    }

    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut parsed: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            if let Ok(value) = value.to_str() {
                parsed
                    .entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
        parsed
    }
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_request::HttpMethod;
    use crate::config::{AccessKey, Endpoint, SecretKey};

    fn test_config() -> DcmConfig {
        DcmConfig::builder()
            .access_key(AccessKey::new("key").unwrap())
            .secret_key(SecretKey::new("secret").unwrap())
            .endpoint(Endpoint::new("https://dcm.example.com").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(test_config());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_send_rejects_invalid_request_before_network() {
        let client = ApiClient::new(test_config()).unwrap();
        let request = ApiRequest::builder(HttpMethod::Post, "admin/Account").build();

        let result = client.send(&request).await;

        assert!(matches!(result, Err(HttpError::InvalidRequest(_))));
    }
}
