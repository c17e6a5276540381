//! Shared HTTP core for the API clients.

use std::time::Duration;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

/// OpenStack token header.
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Shared request plumbing: base URL, default headers, uniform error mapping.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for one API endpoint.
    ///
    /// `auth_token` is sent as `X-Auth-Token` on every request when present.
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            headers.insert(
                AUTH_TOKEN_HEADER,
                HeaderValue::from_str(token).context("invalid auth token")?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        self.parse_response(response).await
    }

    /// POST a JSON body and parse the JSON reply.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        self.parse_response(response).await
    }

    /// POST with an extra header and a JSON body.
    pub async fn post_with_header<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        header: (&str, &str),
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url(path))
            .header(header.0, header.1)
            .json(body)
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// POST with an empty body and parse the JSON reply.
    pub async fn post_no_body<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.post(self.url(path)).send().await?;
        self.parse_response(response).await
    }

    /// POST with an empty body, ignoring any reply payload.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self.client.post(self.url(path)).send().await?;
        self.check_status(response).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.url(path)).send().await?;
        self.check_status(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::Other(anyhow::anyhow!("failed to parse response: {e}")))
        } else {
            Err(self.error_for(response).await)
        }
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_for(response).await)
        }
    }

    async fn error_for(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();

        tracing::debug!(status, path = %url, body = %body, "API request failed");

        if status == 404 {
            return ApiError::NotFound(url);
        }

        // Error bodies vary per service; surface whatever message we can find.
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .or_else(|| v.get("message"))
                    .and_then(|m| m.as_str())
                    .map(|m| m.to_string())
            })
            .unwrap_or(body);

        ApiError::api(status, message)
    }
}
