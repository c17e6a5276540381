//! # ostf-types
//!
//! Data model for the Murano health-check suite.
//!
//! ## Design Principles
//!
//! - Server-issued identifiers stay opaque strings; nothing here invents ids
//!   for resources the platform owns
//! - Wire-status strings are confined to serde attributes on typed enums
//! - The Murano service body format (the `"?"` header block and friends) is
//!   produced in exactly one place, `ServiceDescriptor::to_wire`, so the
//!   stringly-typed shape never leaks past this crate

mod compute;
mod descriptor;
mod environment;
mod names;

pub use compute::{Flavor, Image, MuranoImageInfo};
pub use descriptor::{InstanceSpec, ServiceDescriptor, ServiceRef};
pub use environment::{
    DeployedService, Deployment, DeploymentState, Environment, EnvironmentStatus, ServiceInstance,
    Session,
};
pub use names::rand_name;
