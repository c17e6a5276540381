//! Nova compute API client: flavors and hypervisor capacity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ostf_types::Flavor;

use crate::error::ApiError;
use crate::http::HttpClient;

/// Client for the compute API.
#[derive(Debug, Clone)]
pub struct ComputeClient {
    http: HttpClient,
}

#[derive(Debug, Serialize)]
struct CreateFlavorBody<'a> {
    name: &'a str,
    ram: u64,
    disk: u64,
    vcpus: u32,
}

#[derive(Debug, Serialize)]
struct CreateFlavorRequest<'a> {
    flavor: CreateFlavorBody<'a>,
}

#[derive(Debug, Deserialize)]
struct FlavorResponse {
    flavor: Flavor,
}

#[derive(Debug, Deserialize)]
struct Hypervisor {
    memory_mb: u64,

    #[serde(default)]
    memory_mb_used: u64,
}

#[derive(Debug, Deserialize)]
struct HypervisorsResponse {
    hypervisors: Vec<Hypervisor>,
}

impl ComputeClient {
    /// Create a client for the given compute endpoint.
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(base_url, auth_token)?,
        })
    }

    /// Create a flavor sized for the scenario's instances.
    pub async fn create_flavor(
        &self,
        name: &str,
        ram_mb: u64,
        disk_gb: u64,
        vcpus: u32,
    ) -> Result<Flavor, ApiError> {
        debug!(name, ram_mb, disk_gb, vcpus, "creating flavor");
        let response: FlavorResponse = self
            .http
            .post(
                "/flavors",
                &CreateFlavorRequest {
                    flavor: CreateFlavorBody {
                        name,
                        ram: ram_mb,
                        disk: disk_gb,
                        vcpus,
                    },
                },
            )
            .await?;
        Ok(response.flavor)
    }

    /// Delete a flavor by id.
    pub async fn delete_flavor(&self, flavor_id: &str) -> Result<(), ApiError> {
        debug!(flavor_id, "deleting flavor");
        self.http.delete(&format!("/flavors/{flavor_id}")).await
    }

    /// Largest amount of free RAM on any compute node, in MB.
    pub async fn max_free_node_ram_mb(&self) -> Result<u64, ApiError> {
        let response: HypervisorsResponse = self.http.get("/os-hypervisors/detail").await?;
        let best = response
            .hypervisors
            .iter()
            .map(|h| h.memory_mb.saturating_sub(h.memory_mb_used))
            .max()
            .unwrap_or(0);
        Ok(best)
    }
}
