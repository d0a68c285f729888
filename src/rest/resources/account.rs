//! Customer accounts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::RestResource;

/// One customer account.
///
/// Read-only in this crate; accounts are provisioned out of band.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Account {
    /// The account's id.
    pub account_id: Option<u64>,
    /// Display name.
    pub name: Option<String>,
    /// Lifecycle state, e.g. `ACTIVE`.
    pub status: Option<String>,
    /// Whether the account has cloud resources provisioned.
    pub provisioned: Option<bool>,
    /// Whether initial configuration has completed.
    pub configured: Option<bool>,
    /// The owning user, as a nested payload.
    pub owner: Option<Value>,
    /// The billing customer, as a nested payload.
    pub customer: Option<Value>,
    /// Subscription plan id.
    pub plan_id: Option<u64>,
    /// External billing system id.
    pub billing_system_id: Option<u64>,
    /// Budget applied to resources created without one.
    pub default_budget: Option<u64>,
    /// Whether DNS records are managed automatically.
    pub dns_automation: Option<bool>,
    /// Alert delivery settings, as a nested payload.
    pub alert_configuration: Option<Value>,
    /// The cloud this account is subscribed to, as a nested payload.
    pub cloud_subscription: Option<Value>,
    /// Whether the subscription is active.
    pub subscribed: Option<bool>,
}

impl RestResource for Account {
    const NAME: &'static str = "Account";
    const PATH: &'static str = "admin/Account";
    const COLLECTION: &'static str = "accounts";
    const PRIMARY_KEY: &'static str = "account_id";
    const FIELDS: &'static [&'static str] = &[
        "account_id",
        "name",
        "status",
        "provisioned",
        "configured",
        "owner",
        "customer",
        "plan_id",
        "billing_system_id",
        "default_budget",
        "dns_automation",
        "alert_configuration",
        "cloud_subscription",
        "subscribed",
    ];

    fn id(&self) -> Option<u64> {
        self.account_id
    }

    fn from_id(id: u64) -> Self {
        Self {
            account_id: Some(id),
            name: None,
            status: None,
            provisioned: None,
            configured: None,
            owner: None,
            customer: None,
            plan_id: None,
            billing_system_id: None,
            default_budget: None,
            dns_automation: None,
            alert_configuration: None,
            cloud_subscription: None,
            subscribed: None,
        }
    }
}
