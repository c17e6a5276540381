//! Random resource names.

use rand::Rng;

/// Append a random numeric suffix to a prefix.
///
/// Every resource this suite creates (environments, flavors, instances,
/// database credentials) is named this way so parallel runs never collide.
pub fn rand_name(prefix: &str) -> String {
    let suffix: u32 = rand::rng().random_range(100_000..1_000_000);
    format!("{prefix}-{suffix}")
}
