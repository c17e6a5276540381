//! Post-deploy verification: deployment polling, status consistency, and
//! network reachability of the deployed instance.

use std::time::Duration;

use ostf_clients::{ApiError, MuranoClient};
use ostf_types::{DeploymentState, Environment, EnvironmentStatus};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from the verification checks.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("environment entered 'deploy failure'")]
    DeployFailed,

    #[error("no deployments recorded for environment {0}")]
    NoDeployments(String),

    #[error("deployment {id} finished in state '{state}'")]
    BadDeploymentState { id: String, state: String },

    #[error("deployed environment reports no floating IP")]
    NoFloatingIp,

    #[error("path check failed: GET {url} returned {status}")]
    PathUnavailable { url: String, status: u16 },
}

/// Poll an environment until it reaches a terminal state.
///
/// Returns the refreshed environment on `ready` and fails fast on
/// `deploy failure`. The caller's step timeout bounds the overall wait.
pub async fn wait_for_deploy(
    murano: &MuranoClient,
    env_id: &str,
    poll_interval: Duration,
) -> Result<Environment, CheckError> {
    loop {
        let env = murano.get_environment(env_id).await?;
        debug!(env_id, status = ?env.status, "deployment poll");

        match env.status {
            EnvironmentStatus::Ready => return Ok(env),
            EnvironmentStatus::DeployFailure => return Err(CheckError::DeployFailed),
            _ => tokio::time::sleep(poll_interval).await,
        }
    }
}

/// Verify every recorded deployment finished consistently with success.
///
/// `completed_w_warnings` passes with a warning; errors and still-running
/// deployments fail the check.
pub async fn deployments_status_check(
    murano: &MuranoClient,
    env_id: &str,
) -> Result<(), CheckError> {
    let deployments = murano.list_deployments(env_id).await?;
    if deployments.is_empty() {
        return Err(CheckError::NoDeployments(env_id.to_string()));
    }

    for deployment in deployments {
        match deployment.state {
            DeploymentState::Success => {}
            DeploymentState::CompletedWithWarnings => {
                warn!(deployment_id = %deployment.id, "deployment completed with warnings");
            }
            DeploymentState::Running => {
                return Err(CheckError::BadDeploymentState {
                    id: deployment.id,
                    state: "running".to_string(),
                });
            }
            DeploymentState::CompletedWithErrors => {
                return Err(CheckError::BadDeploymentState {
                    id: deployment.id,
                    state: "completed_w_errors".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Check that the declared ports answer on the instance's floating IP.
///
/// Retries each port until it connects; the caller's step timeout bounds the
/// wait for services that are still coming up after the deploy reports ready.
pub async fn ports_check(
    env: &Environment,
    ports: &[u16],
    retry_interval: Duration,
) -> Result<(), CheckError> {
    let ip = env.floating_ip().ok_or(CheckError::NoFloatingIp)?;

    for &port in ports {
        loop {
            match tokio::net::TcpStream::connect((ip, port)).await {
                Ok(_) => {
                    debug!(ip, port, "port is open");
                    break;
                }
                Err(e) => {
                    debug!(ip, port, error = %e, "port not reachable yet");
                    tokio::time::sleep(retry_interval).await;
                }
            }
        }
    }

    Ok(())
}

/// Check that an application path is served on the instance.
///
/// Issues `GET http://<floating-ip>:<port>/<fragment>` and accepts any
/// success status (redirects are followed).
pub async fn check_path(
    env: &Environment,
    path_fragment: &str,
    port: u16,
) -> Result<(), CheckError> {
    let ip = env.floating_ip().ok_or(CheckError::NoFloatingIp)?;
    let url = format!("http://{ip}:{port}/{path_fragment}");
    debug!(%url, "path check");

    let response = reqwest::get(&url).await.map_err(ApiError::Network)?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(CheckError::PathUnavailable {
            url,
            status: response.status().as_u16(),
        })
    }
}
