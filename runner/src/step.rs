//! Step execution: uniform timeout wrapping and structured outcomes.
//!
//! Scenario code runs every remote call through [`StepLog::run`], which
//! attributes failures and timeouts to a numbered step. Sequencing with `?`
//! makes the abort-on-failure semantics explicit: a failed step N returns
//! early and steps N+1.. never execute.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error};

/// A failed or timed-out step, attributed by number.
#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    /// 1-based step number within the scenario. Step 0 means the
    /// precondition queries themselves failed.
    pub step: u32,

    /// What the step was doing.
    pub description: String,

    /// Operator-facing message: the scenario's failure text plus the cause.
    pub message: String,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}): {}", self.step, self.description, self.message)
    }
}

impl std::error::Error for StepFailure {}

/// Timing record of a completed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: u32,
    pub description: String,
    pub duration_ms: u64,
}

/// What a finished scenario run looked like.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Steps that completed, in order. On failure this stops before the
    /// failed step.
    pub steps: Vec<StepRecord>,
}

/// Terminal outcome of one scenario run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    /// All steps completed within their timeouts.
    Passed { report: ScenarioReport },

    /// A precondition was not met; nothing was provisioned beyond what the
    /// reason describes.
    Skipped { reason: String },

    /// A step failed or timed out; later steps did not run.
    Failed {
        failure: StepFailure,
        report: ScenarioReport,
    },
}

impl ScenarioOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Accumulates step timings while a scenario runs.
#[derive(Debug)]
pub struct StepLog {
    scenario: &'static str,
    started_at: DateTime<Utc>,
    steps: Vec<StepRecord>,
}

impl StepLog {
    pub fn new(scenario: &'static str) -> Self {
        Self {
            scenario,
            started_at: Utc::now(),
            steps: Vec::new(),
        }
    }

    /// Run one step under a timeout.
    ///
    /// On success the step is recorded and the value returned for later
    /// steps. On error or timeout the failure carries the step number and
    /// `fail_msg` followed by the cause.
    pub async fn run<T, E, F>(
        &mut self,
        timeout: Duration,
        step: u32,
        fail_msg: &str,
        description: &str,
        fut: F,
    ) -> Result<T, StepFailure>
    where
        E: fmt::Display,
        F: Future<Output = Result<T, E>>,
    {
        debug!(scenario = self.scenario, step, description, "running step");
        let started = std::time::Instant::now();

        let failure = match tokio::time::timeout(timeout, fut).await {
            Ok(Ok(value)) => {
                let duration_ms = started.elapsed().as_millis() as u64;
                debug!(scenario = self.scenario, step, duration_ms, "step completed");
                self.steps.push(StepRecord {
                    step,
                    description: description.to_string(),
                    duration_ms,
                });
                return Ok(value);
            }
            Ok(Err(cause)) => StepFailure {
                step,
                description: description.to_string(),
                message: format!("{fail_msg}{cause}"),
            },
            Err(_) => StepFailure {
                step,
                description: description.to_string(),
                message: format!("{fail_msg}step timed out after {}s", timeout.as_secs()),
            },
        };

        error!(scenario = self.scenario, step, message = %failure.message, "step failed");
        Err(failure)
    }

    /// Close the log into a report.
    pub fn finish(self) -> ScenarioReport {
        ScenarioReport {
            scenario: self.scenario.to_string(),
            started_at: self.started_at,
            finished_at: Utc::now(),
            steps: self.steps,
        }
    }
}
