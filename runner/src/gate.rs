//! Precondition gate and flavor teardown guard.

use ostf_clients::{ApiError, ComputeClient, ImageClient};
use ostf_types::{rand_name, Flavor, Image};
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;

/// OS family the scenarios deploy.
const REQUIRED_OS_KIND: &str = "linux";

/// Whether a scenario may run, decided before any environment exists.
#[derive(Debug)]
pub enum GateDecision {
    /// Preconditions hold; a flavor has been created and must be released.
    Ready(GateReady),

    /// A precondition is not met. Nothing was provisioned; the reason tells
    /// the operator what to fix.
    Skip(String),
}

/// Resources the gate provisioned or resolved for the scenario.
#[derive(Debug)]
pub struct GateReady {
    pub flavor: Flavor,
    pub image: Image,
    pub guard: FlavorGuard,
}

/// Owns the throwaway flavor until teardown.
///
/// Constructed only after flavor creation succeeded, so release is attempted
/// exactly when there is something to release.
#[derive(Debug)]
pub struct FlavorGuard {
    compute: ComputeClient,
    flavor_id: String,
}

impl FlavorGuard {
    fn new(compute: ComputeClient, flavor_id: String) -> Self {
        Self { compute, flavor_id }
    }

    /// Delete the flavor. Runs after the scenario regardless of its outcome;
    /// a failed deletion is logged and never overrides that outcome.
    pub async fn release(self) {
        match self.compute.delete_flavor(&self.flavor_id).await {
            Ok(()) => debug!(flavor_id = %self.flavor_id, "flavor released"),
            Err(e) => warn!(flavor_id = %self.flavor_id, error = %e, "failed to delete flavor"),
        }
    }
}

/// Check capacity and image preconditions, then provision the flavor.
///
/// Order matters: both skip checks run before the flavor side effect, so a
/// skipped run leaves nothing behind.
pub async fn check_preconditions(
    compute: &ComputeClient,
    images: &ImageClient,
    config: &RunnerConfig,
) -> Result<GateDecision, ApiError> {
    let max_free_ram_mb = compute.max_free_node_ram_mb().await?;
    if max_free_ram_mb < config.min_ram_mb {
        let reason = format!(
            "This check requires more hardware resources: at least one compute node \
             must have >= {} MB of free RAM, but the best node has only {} MB.",
            config.min_ram_mb, max_free_ram_mb
        );
        debug!(%reason, "skipping scenario");
        return Ok(GateDecision::Skip(reason));
    }

    let Some(image) = images.find_murano_image(REQUIRED_OS_KIND).await? else {
        let reason = format!(
            "No Linux image with Murano metadata is registered. See {} for how to \
             upload and register an image for Murano.",
            config.docs_url
        );
        debug!(%reason, "skipping scenario");
        return Ok(GateDecision::Skip(reason));
    };

    let flavor_name = rand_name("ostf-test-murano-flavor");
    let flavor = compute
        .create_flavor(&flavor_name, config.min_ram_mb, config.flavor_disk_gb, 1)
        .await?;
    info!(flavor = %flavor.name, image = %image.name, "preconditions met");

    let guard = FlavorGuard::new(compute.clone(), flavor.id.clone());
    Ok(GateDecision::Ready(GateReady {
        flavor,
        image,
        guard,
    }))
}
