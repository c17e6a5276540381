//! Murano application-catalog API client.
//!
//! Covers the environment/session/service/deployment operations the
//! scenarios drive:
//! - environments are created, queried, and deleted
//! - a session is opened per environment and consumed by the deploy call
//! - services are added to the session, identified by the session header

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use ostf_types::{Deployment, Environment, ServiceDescriptor, ServiceRef, Session};

use crate::error::ApiError;
use crate::http::HttpClient;

/// Header carrying the configuration-session id on service calls.
const SESSION_HEADER: &str = "X-Configuration-Session";

/// Client for the Murano HTTP API.
#[derive(Debug, Clone)]
pub struct MuranoClient {
    http: HttpClient,
}

#[derive(Debug, Serialize)]
struct CreateEnvironmentRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListDeploymentsResponse {
    deployments: Vec<Deployment>,
}

impl MuranoClient {
    /// Create a client for the given Murano endpoint.
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(base_url, auth_token)?,
        })
    }

    /// Create an empty environment with the given name.
    pub async fn create_environment(&self, name: &str) -> Result<Environment, ApiError> {
        debug!(name, "creating environment");
        self.http
            .post("/v1/environments", &CreateEnvironmentRequest { name })
            .await
    }

    /// Fetch the current state of an environment.
    pub async fn get_environment(&self, env_id: &str) -> Result<Environment, ApiError> {
        self.http.get(&format!("/v1/environments/{env_id}")).await
    }

    /// Delete an environment and everything deployed in it.
    pub async fn delete_environment(&self, env_id: &str) -> Result<(), ApiError> {
        debug!(env_id, "deleting environment");
        self.http.delete(&format!("/v1/environments/{env_id}")).await
    }

    /// Open a configuration session for an environment.
    pub async fn create_session(&self, env_id: &str) -> Result<Session, ApiError> {
        debug!(env_id, "creating session");
        self.http
            .post_no_body(&format!("/v1/environments/{env_id}/configure"))
            .await
    }

    /// Add a service to an environment within a session.
    ///
    /// Returns the raw service body the API echoed back; composite services
    /// embed it when declaring their dependencies.
    pub async fn create_service(
        &self,
        env_id: &str,
        session_id: &str,
        descriptor: &ServiceDescriptor,
    ) -> Result<ServiceRef, ApiError> {
        debug!(env_id, session_id, kind = descriptor.display_name(), "creating service");
        let body: Value = self
            .http
            .post_with_header(
                &format!("/v1/environments/{env_id}/services"),
                (SESSION_HEADER, session_id),
                &descriptor.to_wire(),
            )
            .await?;
        Ok(ServiceRef(body))
    }

    /// Send a session off for deployment.
    pub async fn deploy_session(&self, env_id: &str, session_id: &str) -> Result<(), ApiError> {
        debug!(env_id, session_id, "deploying session");
        self.http
            .post_empty(&format!("/v1/environments/{env_id}/sessions/{session_id}/deploy"))
            .await
    }

    /// List the deployments recorded for an environment.
    pub async fn list_deployments(&self, env_id: &str) -> Result<Vec<Deployment>, ApiError> {
        let response: ListDeploymentsResponse = self
            .http
            .get(&format!("/v1/environments/{env_id}/deployments"))
            .await?;
        Ok(response.deployments)
    }
}
