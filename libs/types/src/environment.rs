//! Environment, session, and deployment records as reported by Murano.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvironmentStatus {
    #[serde(rename = "pending")]
    Pending,

    #[serde(rename = "deploying")]
    Deploying,

    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "deploy failure")]
    DeployFailure,

    #[serde(rename = "deleting")]
    Deleting,
}

impl EnvironmentStatus {
    /// Returns true for states the deploy poll treats as terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::DeployFailure)
    }
}

/// A named container for deployed services.
///
/// Created empty, populated through a session, deployed, and deleted within
/// a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub status: EnvironmentStatus,

    /// Services as reported after deployment. Absent on a freshly created
    /// environment.
    #[serde(default)]
    pub services: Vec<DeployedService>,
}

impl Environment {
    /// First floating IP reported by any deployed service instance.
    pub fn floating_ip(&self) -> Option<&str> {
        self.services
            .iter()
            .filter_map(|s| s.instance.as_ref())
            .filter_map(|i| i.floating_ip_address.as_deref())
            .next()
    }
}

/// A deployed service entry inside an environment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployedService {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub instance: Option<ServiceInstance>,
}

/// Instance block of a deployed service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInstance {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "floatingIpAddress", default)]
    pub floating_ip_address: Option<String>,
}

/// A transient edit context scoped to one environment.
///
/// Created before services are added and consumed by the deploy call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,

    #[serde(default)]
    pub state: Option<String>,
}

/// Terminal and in-flight states of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentState {
    #[serde(rename = "running")]
    Running,

    #[serde(rename = "success")]
    Success,

    #[serde(rename = "completed_w_errors")]
    CompletedWithErrors,

    #[serde(rename = "completed_w_warnings")]
    CompletedWithWarnings,
}

/// One deployment record of an environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub state: DeploymentState,
}
