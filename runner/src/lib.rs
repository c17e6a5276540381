//! # ostf-runner
//!
//! Sequential scenario runner for Murano Linux-service health checks.
//!
//! A run has four phases:
//!
//! - **Precondition gate**: free compute RAM and a Murano-tagged Linux image
//!   are required; either missing turns the run into a Skip, not a failure.
//!   On success the gate creates a throwaway flavor.
//! - **Scenario**: a fixed, numbered sequence of remote calls, each wrapped
//!   in a step timeout. The first failing step aborts the rest and is
//!   reported with its step number and message.
//! - **Checks**: deployment polling, deployment status consistency, and
//!   network reachability of the deployed instance.
//! - **Teardown**: the gate's flavor is released whatever the scenario did.
//!
//! Execution is single-threaded and strictly ordered; the only looping is
//! bounded polling inside the deploy and reachability checks.

mod checks;
mod config;
mod gate;
mod scenario;
mod step;

pub use checks::CheckError;
pub use config::RunnerConfig;
pub use gate::{FlavorGuard, GateDecision, GateReady};
pub use scenario::{run_scenario, Clients, ScenarioKind};
pub use step::{ScenarioOutcome, ScenarioReport, StepFailure, StepLog, StepRecord};
