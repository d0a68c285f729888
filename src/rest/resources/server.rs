//! Cloud servers.
//!
//! The richest binding in the crate: launch and lifecycle operations,
//! required-attribute validation, and tracked updates.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::clients::ApiClient;
use crate::rest::validate;
use crate::rest::{Entity, ResourceError, RestResource};
use crate::wire;

use super::job::{Job, WaitOptions};

/// One cloud server.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Server {
    /// The server's id.
    pub server_id: Option<u64>,
    /// Display name, required at launch.
    pub name: Option<String>,
    /// Free-form description, required at launch.
    pub description: Option<String>,
    /// Short label shown in listings.
    pub label: Option<String>,
    /// Lifecycle state, e.g. `RUNNING`, `PAUSED`, `STOPPED`, `TERMINATED`.
    pub status: Option<String>,
    /// Guest platform, e.g. `UBUNTU`.
    pub platform: Option<String>,
    /// CPU architecture, e.g. `I64`.
    pub architecture: Option<String>,
    /// Version of the guest agent, when one is installed.
    pub agent_version: Option<String>,
    /// Billing code the server runs under, required at launch.
    pub budget: Option<u64>,
    /// Provider instance-size id, required at launch.
    pub provider_product_id: Option<String>,
    /// The provider's own id for the instance.
    pub provider_id: Option<String>,
    /// The image to boot from, as a nested payload; required at launch.
    pub machine_image: Option<Value>,
    /// Where to place the server, as a nested payload; required at launch.
    pub data_center: Option<Value>,
    /// The owning cloud, as a nested payload.
    pub cloud: Option<Value>,
    /// The owning region, as a nested payload.
    pub region: Option<Value>,
    /// Firewalls attached to the server.
    pub firewalls: Option<Value>,
    /// Name of the SSH keypair to inject at launch.
    pub keypair: Option<String>,
    /// Groups with ownership rights, as nested payloads.
    pub owning_groups: Option<Value>,
    /// The owning user, as a nested payload.
    pub owning_user: Option<Value>,
    /// Private addresses, as nested payloads.
    pub private_ip_addresses: Option<Value>,
    /// Public address, when one is assigned.
    pub public_ip_address: Option<String>,
    /// Whether the cloud supports pausing this server.
    pub pause_supported: Option<bool>,
    /// When the server started.
    pub start_date: Option<String>,
    /// When the server stopped.
    pub stop_date: Option<String>,
}

impl RestResource for Server {
    const NAME: &'static str = "Server";
    const PATH: &'static str = "infrastructure/Server";
    const COLLECTION: &'static str = "servers";
    const PRIMARY_KEY: &'static str = "server_id";
    const FIELDS: &'static [&'static str] = &[
        "server_id",
        "name",
        "description",
        "label",
        "status",
        "platform",
        "architecture",
        "agent_version",
        "budget",
        "provider_product_id",
        "provider_id",
        "machine_image",
        "data_center",
        "cloud",
        "region",
        "firewalls",
        "keypair",
        "owning_groups",
        "owning_user",
        "private_ip_addresses",
        "public_ip_address",
        "pause_supported",
        "start_date",
        "stop_date",
    ];

    fn id(&self) -> Option<u64> {
        self.server_id
    }

    fn from_id(id: u64) -> Self {
        Self {
            server_id: Some(id),
            name: None,
            description: None,
            label: None,
            status: None,
            platform: None,
            architecture: None,
            agent_version: None,
            budget: None,
            provider_product_id: None,
            provider_id: None,
            machine_image: None,
            data_center: None,
            cloud: None,
            region: None,
            firewalls: None,
            keypair: None,
            owning_groups: None,
            owning_user: None,
            private_ip_addresses: None,
            public_ip_address: None,
            pause_supported: None,
            start_date: None,
            stop_date: None,
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        let mut server = Self::from_id(0);
        server.server_id = None;
        server
    }
}

/// Attributes an update call may submit.
const UPDATABLE: [&str; 3] = ["name", "description", "label"];

impl Entity<Server> {
    /// Records a name change pending the next [`Entity::update`].
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        let old = self.name.clone().map_or(Value::Null, Value::String);
        self.resource_mut()
            .pending_changes_mut()
            .track("name", old, Value::String(name.clone()));
        self.name = Some(name);
    }

    /// Records a description change pending the next [`Entity::update`].
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        let old = self.description.clone().map_or(Value::Null, Value::String);
        self.resource_mut()
            .pending_changes_mut()
            .track("description", old, Value::String(description.clone()));
        self.description = Some(description);
    }

    /// Records a label change pending the next [`Entity::update`].
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        let old = self.label.clone().map_or(Value::Null, Value::String);
        self.resource_mut()
            .pending_changes_mut()
            .track("label", old, Value::String(label.clone()));
        self.label = Some(label);
    }

    /// Launches the server described by the set attributes.
    ///
    /// Returns the id of the provisioning job when the server accepts the
    /// launch asynchronously.
    ///
    /// # Errors
    ///
    /// [`ResourceError::State`] when the server already exists, and
    /// [`ResourceError::MissingAttributes`] when a required launch
    /// attribute is unset, both before any network traffic; plus the usual
    /// call errors.
    pub async fn launch(&mut self, client: &ApiClient) -> Result<Option<u64>, ResourceError> {
        if let Some(id) = self.server_id {
            return Err(ResourceError::State {
                message: format!("server {id} is already launched"),
            });
        }
        validate::require_set(
            Server::NAME,
            &[
                ("name", self.name.is_some()),
                ("description", self.description.is_some()),
                ("budget", self.budget.is_some()),
                ("provider_product_id", self.provider_product_id.is_some()),
                ("machine_image", self.machine_image.is_some()),
                ("data_center", self.data_center.is_some()),
            ],
        )?;

        let mut payload = Map::new();
        payload.insert("name".to_string(), json!(self.name));
        payload.insert("description".to_string(), json!(self.description));
        payload.insert("budget".to_string(), json!(self.budget));
        // The attribute is provider_product_id; the API takes it as productId.
        payload.insert("product_id".to_string(), json!(self.provider_product_id));
        payload.insert("machine_image".to_string(), json!(self.machine_image));
        payload.insert("data_center".to_string(), json!(self.data_center));
        if let Some(label) = &self.label {
            payload.insert("label".to_string(), Value::String(label.clone()));
        }
        if let Some(keypair) = &self.keypair {
            payload.insert("keypair".to_string(), Value::String(keypair.clone()));
        }

        let body = json!({ "launch": [wire::to_wire_case(Value::Object(payload))] });
        self.resource_mut().set_path(Server::PATH);
        self.resource_mut().post(client, body).await?;
        Ok(self.resource().current_job())
    }

    /// Stops a running server.
    ///
    /// # Errors
    ///
    /// [`ResourceError::State`] unless the server is `RUNNING`.
    pub async fn stop(
        &mut self,
        client: &ApiClient,
        reason: Option<&str>,
    ) -> Result<Option<u64>, ResourceError> {
        self.require_status("stop", &["RUNNING"])?;
        let body = json!({ "stop": [Self::reason_payload(reason)] });
        self.resource_mut().put(client, body).await?;
        Ok(self.resource().current_job())
    }

    /// Starts a stopped or paused server.
    ///
    /// # Errors
    ///
    /// [`ResourceError::State`] unless the server is `STOPPED` or `PAUSED`.
    pub async fn start(
        &mut self,
        client: &ApiClient,
        reason: Option<&str>,
    ) -> Result<Option<u64>, ResourceError> {
        self.require_status("start", &["STOPPED", "PAUSED"])?;
        let body = json!({ "start": [Self::reason_payload(reason)] });
        self.resource_mut().put(client, body).await?;
        Ok(self.resource().current_job())
    }

    /// Pauses a running server.
    ///
    /// # Errors
    ///
    /// [`ResourceError::State`] unless the server is `RUNNING`.
    pub async fn pause(
        &mut self,
        client: &ApiClient,
        reason: Option<&str>,
    ) -> Result<Option<u64>, ResourceError> {
        self.require_status("pause", &["RUNNING"])?;
        let body = json!({ "pause": [Self::reason_payload(reason)] });
        self.resource_mut().put(client, body).await?;
        Ok(self.resource().current_job())
    }

    /// Terminates the server. A `reason` always goes on the wire; callers
    /// passing `None` get the stock one.
    ///
    /// # Errors
    ///
    /// The usual call errors; termination is accepted in any state.
    pub async fn destroy(
        &mut self,
        client: &ApiClient,
        reason: Option<&str>,
    ) -> Result<Option<u64>, ResourceError> {
        let reason = reason.unwrap_or("no reason provided");
        self.resource_mut().set_param("reason", json!(reason));
        self.resource_mut().delete(client).await?;
        Ok(self.resource().current_job())
    }

    /// Refreshes attributes from the server, following the provisioning
    /// job first when the id is not yet known.
    ///
    /// A freshly launched entity has a `current_job` but no `server_id`;
    /// the job's completion message carries the new id.
    ///
    /// # Errors
    ///
    /// [`ResourceError::State`] when there is neither an id nor a job to
    /// follow, or when the completed job's message is not a server id;
    /// plus any polling or load error.
    pub async fn reload(
        &mut self,
        client: &ApiClient,
        options: WaitOptions,
    ) -> Result<(), ResourceError> {
        if self.server_id.is_some() {
            return self.load(client).await;
        }

        let Some(job_id) = self.resource().current_job() else {
            return Err(ResourceError::State {
                message: "server has neither an id nor a provisioning job".to_string(),
            });
        };

        let job = Job::wait_for(client, job_id, options).await?;
        let server_id = job
            .message
            .as_deref()
            .and_then(|m| m.parse::<u64>().ok())
            .ok_or_else(|| ResourceError::State {
                message: format!("job {job_id} did not report a server id"),
            })?;

        self.server_id = Some(server_id);
        self.resource_mut()
            .set_path(format!("{}/{server_id}", Server::PATH));
        self.load(client).await
    }

    fn reason_payload(reason: Option<&str>) -> Value {
        reason.map_or_else(|| json!({}), |r| json!({ "reason": r }))
    }

    /// Submits pending name, description, and label changes.
    ///
    /// Skips the network call entirely when none of those attributes have
    /// pending changes. Other tracked attributes stay pending.
    ///
    /// # Errors
    ///
    /// The usual call errors.
    pub async fn update(&mut self, client: &ApiClient) -> Result<(), ResourceError> {
        let changed = self
            .resource_mut()
            .pending_changes_mut()
            .consume(&UPDATABLE);
        if changed.is_empty() {
            return Ok(());
        }

        let body = json!({ "describeServer": [Value::Object(changed)] });
        self.resource_mut().put(client, body).await?;
        Ok(())
    }

    /// Rejects the operation when the locally known status contradicts it.
    /// An unloaded entity has no status to contradict; the API is the
    /// arbiter then.
    fn require_status(
        &self,
        operation: &str,
        allowed: &[&str],
    ) -> Result<(), ResourceError> {
        match self.status.as_deref() {
            None => Ok(()),
            Some(status) if allowed.contains(&status) => Ok(()),
            Some(status) => Err(ResourceError::State {
                message: format!("cannot {operation} a server in status {status}"),
            }),
        }
    }
}
