//! # ostf-clients
//!
//! Thin reqwest clients over the three API surfaces the health-check suite
//! drives: the Murano application catalog, the Nova compute API (flavors and
//! hypervisor capacity), and the Glance image API.
//!
//! All real work (scheduling, orchestration, networking) happens inside the
//! platform; these clients only shape requests and map error responses.

mod compute;
mod error;
mod http;
mod images;
mod murano;

pub use compute::ComputeClient;
pub use error::ApiError;
pub use http::HttpClient;
pub use images::ImageClient;
pub use murano::MuranoClient;
