//! Glance image API client.

use serde::Deserialize;
use tracing::debug;

use ostf_types::Image;

use crate::error::ApiError;
use crate::http::HttpClient;

/// Client for the image API.
#[derive(Debug, Clone)]
pub struct ImageClient {
    http: HttpClient,
}

#[derive(Debug, Deserialize)]
struct ListImagesResponse {
    images: Vec<Image>,
}

impl ImageClient {
    /// Create a client for the given image endpoint.
    pub fn new(base_url: &str, auth_token: Option<&str>) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(base_url, auth_token)?,
        })
    }

    /// Find an image registered for Murano with the given OS family.
    ///
    /// Returns `None` when no image carries matching `murano_image_info`
    /// metadata; the caller decides whether that is a skip condition.
    pub async fn find_murano_image(&self, os_kind: &str) -> Result<Option<Image>, ApiError> {
        let response: ListImagesResponse = self.http.get("/v2/images").await?;
        let image = response
            .images
            .into_iter()
            .find(|img| img.murano_info.as_ref().is_some_and(|info| info.kind == os_kind));

        match &image {
            Some(img) => debug!(image = %img.name, os_kind, "found Murano image"),
            None => debug!(os_kind, "no Murano image registered"),
        }
        Ok(image)
    }
}
