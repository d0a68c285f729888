//! HTTP transport: request building, signing headers, and response parsing.
//!
//! [`ApiClient`] is the single network boundary of the crate. Everything
//! above it (`rest`) works in terms of [`ApiRequest`] and [`ApiResponse`]
//! and never touches `reqwest` directly.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidApiRequestError};
pub use http_client::ApiClient;
pub use http_request::{ApiRequest, ApiRequestBuilder, DetailLevel, HttpMethod, PayloadFormat};
pub use http_response::ApiResponse;
