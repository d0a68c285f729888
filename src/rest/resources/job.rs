//! Async jobs.
//!
//! Mutating calls that return a 202 spawn a job; this binding reads job
//! state and polls it to completion.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clients::ApiClient;
use crate::rest::{Entity, ResourceError, RestResource};

/// One async job.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Job {
    /// The job's id.
    pub job_id: Option<u64>,
    /// Current state, e.g. `RUNNING`, `COMPLETE`, or `ERROR`.
    pub status: Option<String>,
    /// What the job is doing.
    pub description: Option<String>,
    /// Result or error detail, populated on completion.
    pub message: Option<String>,
    /// When the job started.
    pub start_date: Option<DateTime<Utc>>,
    /// When the job finished.
    pub end_date: Option<DateTime<Utc>>,
}

impl RestResource for Job {
    const NAME: &'static str = "Job";
    const PATH: &'static str = "admin/Job";
    const COLLECTION: &'static str = "jobs";
    const PRIMARY_KEY: &'static str = "job_id";
    const FIELDS: &'static [&'static str] = &[
        "job_id",
        "status",
        "description",
        "message",
        "start_date",
        "end_date",
    ];

    fn id(&self) -> Option<u64> {
        self.job_id
    }

    fn from_id(id: u64) -> Self {
        Self {
            job_id: Some(id),
            status: None,
            description: None,
            message: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// How to poll a job.
#[derive(Clone, Debug)]
pub struct WaitOptions {
    /// The status that counts as success.
    pub target: String,
    /// Delay between polls.
    pub interval: Duration,
    /// Polls before giving up with [`ResourceError::PollTimeout`].
    pub max_attempts: u32,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            target: "COMPLETE".to_string(),
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

impl Job {
    /// Polls a job until it reaches the target status.
    ///
    /// Returns the loaded job once the target status is observed.
    ///
    /// # Errors
    ///
    /// [`ResourceError::State`] if the job reports `ERROR`,
    /// [`ResourceError::PollTimeout`] once `max_attempts` polls have passed
    /// without reaching the target, and any load error from the underlying
    /// fetches.
    pub async fn wait_for(
        client: &ApiClient,
        job_id: u64,
        options: WaitOptions,
    ) -> Result<Entity<Self>, ResourceError> {
        let mut job = Entity::<Self>::from_id(job_id);

        for attempt in 1..=options.max_attempts {
            job.load(client).await?;

            match job.status.as_deref() {
                Some(status) if status == options.target => {
                    debug!(job_id, attempt, "job reached target status");
                    return Ok(job);
                }
                Some("ERROR") => {
                    let detail = job
                        .message
                        .clone()
                        .unwrap_or_else(|| "no detail".to_string());
                    return Err(ResourceError::State {
                        message: format!("job {job_id} failed: {detail}"),
                    });
                }
                _ => {}
            }

            if attempt < options.max_attempts {
                tokio::time::sleep(options.interval).await;
            }
        }

        Err(ResourceError::PollTimeout {
            job_id,
            attempts: options.max_attempts,
        })
    }
}
