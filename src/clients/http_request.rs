//! Request types for the HTTP transport layer.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::errors::InvalidApiRequestError;

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET: read a resource or collection.
    Get,
    /// POST: create a resource.
    Post,
    /// PUT: modify a resource or trigger an operation on it.
    Put,
    /// DELETE: remove a resource.
    Delete,
}

impl HttpMethod {
    /// Returns the method as an uppercase static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload formats the API can serve.
///
/// JSON is the only format this crate parses; XML responses are passed
/// through as raw text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayloadFormat {
    /// `application/json` (the default).
    #[default]
    Json,
    /// `application/xml`, returned raw.
    Xml,
}

impl PayloadFormat {
    /// Returns the Accept header value for this format.
    #[must_use]
    pub const fn as_accept(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }
}

/// The level of detail the API should include in responses, sent as the
/// `x-es-details` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailLevel {
    /// Identifying fields only.
    Basic,
    /// Full detail (the default).
    #[default]
    Extended,
    /// No optional detail.
    None,
}

impl DetailLevel {
    /// Returns the header value for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Extended => "extended",
            Self::None => "none",
        }
    }
}

/// A single API request, ready to be signed and dispatched.
///
/// Construct via [`ApiRequest::builder`].
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Resource path without the endpoint or base path, e.g. `admin/Job/123`.
    pub path: String,
    /// JSON body, required for POST and PUT.
    pub body: Option<Value>,
    /// Query string parameters, already in wire (camelCase) form.
    pub query: Option<HashMap<String, String>>,
    /// Per-request detail level override.
    pub details: Option<DetailLevel>,
    /// Response payload format.
    pub format: PayloadFormat,
}

impl ApiRequest {
    /// Creates a builder for a request with the given method and path.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> ApiRequestBuilder {
        ApiRequestBuilder {
            method,
            path: path.into(),
            body: None,
            query: None,
            details: None,
            format: PayloadFormat::default(),
        }
    }

    /// Validates the request before dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidApiRequestError::MissingBody`] for a POST or PUT
    /// without a body.
    pub fn verify(&self) -> Result<(), InvalidApiRequestError> {
        match self.method {
            HttpMethod::Post | HttpMethod::Put if self.body.is_none() => {
                Err(InvalidApiRequestError::MissingBody {
                    method: self.method.as_str(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for [`ApiRequest`].
#[derive(Clone, Debug)]
pub struct ApiRequestBuilder {
    method: HttpMethod,
    path: String,
    body: Option<Value>,
    query: Option<HashMap<String, String>>,
    details: Option<DetailLevel>,
    format: PayloadFormat,
}

impl ApiRequestBuilder {
    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets query string parameters.
    #[must_use]
    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Overrides the detail level for this request.
    #[must_use]
    pub const fn details(mut self, details: DetailLevel) -> Self {
        self.details = Some(details);
        self
    }

    /// Sets the response payload format.
    #[must_use]
    pub const fn format(mut self, format: PayloadFormat) -> Self {
        self.format = format;
        self
    }

    /// Builds the request.
    #[must_use]
    pub fn build(self) -> ApiRequest {
        ApiRequest {
            method: self.method,
            path: self.path,
            body: self.body,
            query: self.query,
            details: self.details,
            format: self.format,
        }
    }
}
