//! Runner configuration.

use std::time::Duration;

/// Configuration for a scenario run.
///
/// `from_env` reads `OSTF_*` variables; tests construct the struct directly
/// with shortened timeouts.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Murano API endpoint.
    pub murano_url: String,

    /// Nova compute API endpoint.
    pub compute_url: String,

    /// Glance image API endpoint.
    pub image_url: String,

    /// Auth token sent as `X-Auth-Token`, if the deployment requires one.
    pub auth_token: Option<String>,

    /// Free RAM a compute node must have for the scenario to run, in MB.
    /// Also the RAM size of the throwaway flavor.
    pub min_ram_mb: u64,

    /// Disk size of the throwaway flavor, in GB.
    pub flavor_disk_gb: u64,

    /// Budget for the deployment to reach a terminal state.
    pub deploy_timeout: Duration,

    /// Interval between polls while waiting on the platform.
    pub poll_interval: Duration,

    /// Ports the deployed web server must answer on.
    pub web_ports: Vec<u16>,

    /// Documentation pointer included in the missing-image skip message.
    pub docs_url: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            murano_url: "http://localhost:8082".to_string(),
            compute_url: "http://localhost:8774/v2.1".to_string(),
            image_url: "http://localhost:9292".to_string(),
            auth_token: None,
            min_ram_mb: 2048,
            flavor_disk_gb: 60,
            deploy_timeout: Duration::from_secs(1800),
            poll_interval: Duration::from_secs(5),
            web_ports: vec![80],
            docs_url: "https://docs.openstack.org/murano/latest/admin/appdev-guide/murano_images.html"
                .to_string(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from `OSTF_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            murano_url: env_or("OSTF_MURANO_URL", defaults.murano_url),
            compute_url: env_or("OSTF_COMPUTE_URL", defaults.compute_url),
            image_url: env_or("OSTF_IMAGE_URL", defaults.image_url),
            auth_token: std::env::var("OSTF_AUTH_TOKEN").ok().filter(|t| !t.is_empty()),
            min_ram_mb: env_parsed("OSTF_MIN_RAM_MB", defaults.min_ram_mb),
            flavor_disk_gb: env_parsed("OSTF_FLAVOR_DISK_GB", defaults.flavor_disk_gb),
            deploy_timeout: Duration::from_secs(env_parsed(
                "OSTF_DEPLOY_TIMEOUT_SECS",
                defaults.deploy_timeout.as_secs(),
            )),
            poll_interval: Duration::from_secs(env_parsed(
                "OSTF_POLL_INTERVAL_SECS",
                defaults.poll_interval.as_secs(),
            )),
            web_ports: std::env::var("OSTF_WEB_PORTS")
                .ok()
                .map(|raw| {
                    raw.split(',')
                        .filter_map(|p| p.trim().parse().ok())
                        .collect()
                })
                .filter(|ports: &Vec<u16>| !ports.is_empty())
                .unwrap_or(defaults.web_ports),
            docs_url: env_or("OSTF_DOCS_URL", defaults.docs_url),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
