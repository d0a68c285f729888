//! An async Rust client for the Dell Cloud Manager (enStratus) REST API.
//!
//! Every request is individually signed with HMAC-SHA256; responses are
//! classified by status, translated from the API's camelCase wire format,
//! and decoded into typed resource structs with strict schema checking.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dcm_api::rest::resources::Server;
//! use dcm_api::rest::RestResource;
//! use dcm_api::{AccessKey, ApiClient, DcmConfig, Endpoint, SecretKey};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DcmConfig::builder()
//!     .access_key(AccessKey::new("my-access-key")?)
//!     .secret_key(SecretKey::new("my-secret-key")?)
//!     .endpoint(Endpoint::new("https://dcm.example.com/api/enstratus/2012-06-15")?)
//!     .build()?;
//! let client = ApiClient::new(config)?;
//!
//! for server in Server::all(&client).await? {
//!     println!("{:?} {:?}", server.server_id, server.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`config`]: validated credentials and endpoint configuration
//! - [`auth`]: per-request HMAC signing
//! - [`wire`]: camelCase/snake_case key translation
//! - [`clients`]: the signed HTTP transport
//! - [`rest`]: the generic resource engine and typed bindings
//!
//! # Async Operations
//!
//! Mutating calls often return a 202 and spawn a server-side job. The id
//! lands in [`rest::Resource::current_job`] and can be polled:
//!
//! ```rust,no_run
//! use dcm_api::rest::resources::{Job, WaitOptions};
//! # use dcm_api::ApiClient;
//! # async fn example(client: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
//! let job = Job::wait_for(client, 777, WaitOptions::default()).await?;
//! println!("{:?}", job.message);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod wire;

pub use clients::{ApiClient, ApiRequest, ApiResponse, DetailLevel, HttpMethod, PayloadFormat};
pub use config::{AccessKey, DcmConfig, DcmConfigBuilder, Endpoint, SecretKey};
pub use error::ConfigError;
pub use rest::{CallOutcome, Entity, Resource, ResourceError, RestResource};
