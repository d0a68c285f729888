//! The generic resource engine.
//!
//! [`Resource`] owns everything one API object needs to talk to the server:
//! its path, query parameters, detail level, pending changes, and the
//! outcome of its last call. Typed bindings wrap it via
//! [`Entity`](super::schema::Entity) rather than subclassing it.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::clients::{
    ApiClient, ApiRequest, ApiResponse, DetailLevel, HttpMethod, PayloadFormat,
};
use crate::wire;

use super::errors::ResourceError;
use super::tracking::ChangeSet;

/// Statuses the API uses for definite failures.
const FAILURE_STATUSES: [u16; 7] = [400, 403, 404, 409, 500, 501, 503];

/// What a successful call produced.
#[derive(Clone, Debug, PartialEq)]
pub enum CallOutcome {
    /// A JSON payload, still in wire (camelCase) form.
    Payload(Value),
    /// The call completed with no body (a 204).
    Completed,
    /// A non-JSON payload, returned as raw text.
    Raw(String),
}

/// The state and plumbing shared by every API resource.
#[derive(Clone, Debug)]
pub struct Resource {
    path: String,
    request_details: DetailLevel,
    payload_format: PayloadFormat,
    params: HashMap<String, Value>,
    last_request: Option<ApiResponse>,
    last_error: Option<String>,
    current_job: Option<u64>,
    pending_changes: ChangeSet,
    loaded: bool,
}

impl Resource {
    /// Creates a resource rooted at the given path, e.g. `admin/Job`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            request_details: DetailLevel::default(),
            payload_format: PayloadFormat::default(),
            params: HashMap::new(),
            last_request: None,
            last_error: None,
            current_job: None,
            pending_changes: ChangeSet::new(),
            loaded: false,
        }
    }

    /// Returns the resource path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replaces the resource path.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    /// Returns the detail level requested from the server.
    #[must_use]
    pub const fn request_details(&self) -> DetailLevel {
        self.request_details
    }

    /// Sets the detail level requested from the server.
    pub fn set_request_details(&mut self, details: DetailLevel) {
        self.request_details = details;
    }

    /// Returns the payload format requested from the server.
    #[must_use]
    pub const fn payload_format(&self) -> PayloadFormat {
        self.payload_format
    }

    /// Sets the payload format requested from the server.
    pub fn set_payload_format(&mut self, format: PayloadFormat) {
        self.payload_format = format;
    }

    /// Sets a query parameter, in snake_case attribute form.
    pub fn set_param(&mut self, key: impl Into<String>, value: Value) {
        self.params.insert(key.into(), value);
    }

    /// Returns the full response of the most recent call, if any.
    #[must_use]
    pub const fn last_request(&self) -> Option<&ApiResponse> {
        self.last_request.as_ref()
    }

    /// Returns the error message of the most recent failed call.
    ///
    /// Cleared at the start of every call, so `None` after a call means it
    /// succeeded.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the id of the async job spawned by the most recent 202.
    #[must_use]
    pub const fn current_job(&self) -> Option<u64> {
        self.current_job
    }

    /// Returns true once attributes have been fetched from the server.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Marks the resource as loaded.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Returns the pending change set.
    #[must_use]
    pub const fn pending_changes(&self) -> &ChangeSet {
        &self.pending_changes
    }

    /// Returns the pending change set mutably.
    pub fn pending_changes_mut(&mut self) -> &mut ChangeSet {
        &mut self.pending_changes
    }

    /// Issues a GET against the resource path.
    ///
    /// # Errors
    ///
    /// See [`Resource::execute`].
    pub async fn get(&mut self, client: &ApiClient) -> Result<CallOutcome, ResourceError> {
        self.execute(client, HttpMethod::Get, None).await
    }

    /// Issues a POST with the given wire-case body.
    ///
    /// # Errors
    ///
    /// See [`Resource::execute`].
    pub async fn post(
        &mut self,
        client: &ApiClient,
        body: Value,
    ) -> Result<CallOutcome, ResourceError> {
        self.execute(client, HttpMethod::Post, Some(body)).await
    }

    /// Issues a PUT with the given wire-case body.
    ///
    /// # Errors
    ///
    /// See [`Resource::execute`].
    pub async fn put(
        &mut self,
        client: &ApiClient,
        body: Value,
    ) -> Result<CallOutcome, ResourceError> {
        self.execute(client, HttpMethod::Put, Some(body)).await
    }

    /// Issues a DELETE against the resource path.
    ///
    /// # Errors
    ///
    /// See [`Resource::execute`].
    pub async fn delete(&mut self, client: &ApiClient) -> Result<CallOutcome, ResourceError> {
        self.execute(client, HttpMethod::Delete, None).await
    }

    /// Sends one request and classifies the response by status.
    ///
    /// - Any status in the API's failure set, or any other non-2xx, is a
    ///   failure: the message is recorded in [`Resource::last_error`] and
    ///   returned as [`ResourceError::Api`].
    /// - A 202 records the spawned job id from `jobs[0].jobId` in
    ///   [`Resource::current_job`] and yields the decoded body.
    /// - A 204 on PUT or DELETE yields [`CallOutcome::Completed`].
    /// - Any 2xx on GET, and a 201 on POST, yield [`CallOutcome::Payload`],
    ///   or [`CallOutcome::Raw`] when an XML payload was requested. A 2xx
    ///   the method does not recognize is a failure.
    ///
    /// # Errors
    ///
    /// [`ResourceError::Api`] on a failure status, [`ResourceError::Http`]
    /// when the request never produced a response, and
    /// [`ResourceError::UnexpectedBody`] when a 202 arrives without a
    /// readable job id.
    pub async fn execute(
        &mut self,
        client: &ApiClient,
        method: HttpMethod,
        body: Option<Value>,
    ) -> Result<CallOutcome, ResourceError> {
        self.last_error = None;

        let mut builder = ApiRequest::builder(method, self.path.clone())
            .details(self.request_details)
            .format(self.payload_format);
        if !self.params.is_empty() {
            builder = builder.query(self.wire_query());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let request = builder.build();

        let response = client.send(&request).await?;
        let code = response.code;
        let outcome = self.classify(method, &response);
        self.last_request = Some(response);

        match &outcome {
            Ok(_) => debug!(path = %self.path, status = code, "call succeeded"),
            Err(_) => debug!(path = %self.path, status = code, "call failed"),
        }

        outcome
    }

    fn classify(
        &mut self,
        method: HttpMethod,
        response: &ApiResponse,
    ) -> Result<CallOutcome, ResourceError> {
        // XML callers get the raw response back before any status
        // interpretation.
        if self.payload_format == PayloadFormat::Xml {
            return Ok(CallOutcome::Raw(response.raw.clone()));
        }

        if FAILURE_STATUSES.contains(&response.code) || !response.is_ok() {
            return Err(self.fail(response));
        }

        // Success codes are method-specific past this point; a 2xx the
        // method does not recognize is still a failure.
        match (method, response.code) {
            (HttpMethod::Get, _) | (HttpMethod::Post, 201) => {
                Ok(CallOutcome::Payload(response.body.clone()))
            }
            (HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete, 202) => {
                self.current_job = Some(Self::job_id(response)?);
                Ok(CallOutcome::Payload(response.body.clone()))
            }
            (HttpMethod::Put | HttpMethod::Delete, 204) => Ok(CallOutcome::Completed),
            _ => Err(self.fail(response)),
        }
    }

    /// Records the failure and builds the error returned to the caller.
    fn fail(&mut self, response: &ApiResponse) -> ResourceError {
        let message = response.error_message();
        self.last_error = Some(message.clone());
        ResourceError::Api {
            status: response.code,
            message,
        }
    }

    fn job_id(response: &ApiResponse) -> Result<u64, ResourceError> {
        response
            .body
            .get("jobs")
            .and_then(|jobs| jobs.get(0))
            .and_then(|job| job.get("jobId"))
            .and_then(Value::as_u64)
            .ok_or(ResourceError::UnexpectedBody {
                expected: "jobs[0].jobId",
            })
    }

    /// Converts the attribute-case params into a wire-case query map.
    fn wire_query(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (wire::camelize(key), value)
            })
            .collect()
    }
}
