//! Compute-side records: flavors and Murano-tagged images.

use serde::{Deserialize, Serialize};

/// A named compute sizing profile.
///
/// Created by the precondition gate and deleted in teardown; never reused
/// across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flavor {
    pub id: String,
    pub name: String,

    #[serde(rename = "ram")]
    pub ram_mb: u64,

    #[serde(rename = "disk")]
    pub disk_gb: u64,

    pub vcpus: u32,
}

/// Murano metadata attached to a Glance image.
///
/// Stored on the image as a JSON string under the `murano_image_info`
/// property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuranoImageInfo {
    /// OS family, e.g. `linux` or `windows`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub title: Option<String>,
}

/// A pre-existing VM image; looked up, never created, by this suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,

    #[serde(
        rename = "murano_image_info",
        default,
        deserialize_with = "murano_info_from_string",
        serialize_with = "murano_info_to_string"
    )]
    pub murano_info: Option<MuranoImageInfo>,
}

/// Glance stores the Murano metadata as embedded JSON text; an image with a
/// malformed or missing property is simply not a Murano image.
fn murano_info_from_string<'de, D>(deserializer: D) -> Result<Option<MuranoImageInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| serde_json::from_str(&s).ok()))
}

fn murano_info_to_string<S>(
    info: &Option<MuranoImageInfo>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match info {
        Some(info) => {
            let raw = serde_json::to_string(info).map_err(serde::ser::Error::custom)?;
            serializer.serialize_some(&raw)
        }
        None => serializer.serialize_none(),
    }
}
