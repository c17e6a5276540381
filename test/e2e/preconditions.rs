//! Precondition gate, short-circuit, and teardown properties.
//!
//! ## Running
//!
//! ```bash
//! cargo test -p ostf-e2e --test preconditions
//! ```

use std::time::Duration;

use ostf_runner::{run_scenario, Clients, RunnerConfig, ScenarioKind, ScenarioOutcome};

#[path = "support.rs"]
mod support;

use support::{init_tracing, DeployResult, MockPlatform, PlatformState};

fn test_config(platform: &MockPlatform) -> RunnerConfig {
    RunnerConfig {
        murano_url: platform.uri.clone(),
        compute_url: platform.uri.clone(),
        image_url: platform.uri.clone(),
        deploy_timeout: Duration::from_secs(10),
        poll_interval: Duration::from_millis(50),
        ..RunnerConfig::default()
    }
}

#[tokio::test]
async fn skips_when_no_node_has_enough_free_ram() {
    init_tracing();

    let platform = MockPlatform::start(PlatformState {
        free_ram_mb: 512,
        ..PlatformState::default()
    })
    .await;
    let config = test_config(&platform);
    let clients = Clients::from_config(&config).unwrap();

    let outcome = run_scenario(ScenarioKind::Apache, &clients, &config).await;

    let reason = match outcome {
        ScenarioOutcome::Skipped { reason } => reason,
        other => panic!("expected skip, got: {other:?}"),
    };
    assert!(reason.contains("2048 MB"), "reason should name the requirement: {reason}");
    assert!(reason.contains("512 MB"), "reason should name what is available: {reason}");

    // The gate skipped before any side effect.
    let state = platform.state();
    assert_eq!(state.counters.flavors_created, 0);
    assert_eq!(state.counters.envs_created, 0);
}

#[tokio::test]
async fn skips_when_no_murano_image_is_registered() {
    init_tracing();

    let platform = MockPlatform::start(PlatformState {
        has_image: false,
        ..PlatformState::default()
    })
    .await;
    let config = test_config(&platform);
    let clients = Clients::from_config(&config).unwrap();

    let outcome = run_scenario(ScenarioKind::Wordpress, &clients, &config).await;

    let reason = match outcome {
        ScenarioOutcome::Skipped { reason } => reason,
        other => panic!("expected skip, got: {other:?}"),
    };
    assert!(
        reason.contains(&config.docs_url),
        "reason should point at the docs: {reason}"
    );

    let state = platform.state();
    assert_eq!(state.counters.flavors_created, 0);
    assert_eq!(state.counters.envs_created, 0);
}

#[tokio::test]
async fn deploy_failure_stops_the_scenario_and_still_releases_the_flavor() {
    init_tracing();

    let platform = MockPlatform::start(PlatformState {
        deploy_result: DeployResult::Failure,
        ..PlatformState::default()
    })
    .await;
    let config = test_config(&platform);
    let clients = Clients::from_config(&config).unwrap();

    let outcome = run_scenario(ScenarioKind::Apache, &clients, &config).await;

    let (failure, report) = match outcome {
        ScenarioOutcome::Failed { failure, report } => (failure, report),
        other => panic!("expected failure, got: {other:?}"),
    };

    // The poll is step 5 in scenario A and its message is attributed there.
    assert_eq!(failure.step, 5);
    assert!(
        failure.message.starts_with("Deployment was not completed correctly. "),
        "unexpected message: {}",
        failure.message
    );

    // Steps 1-4 completed; steps 6-8 never ran.
    let numbers: Vec<u32> = report.steps.iter().map(|s| s.step).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    let state = platform.state();
    assert_eq!(state.counters.deployments_listed, 0, "status check must not run");
    assert_eq!(state.counters.envs_deleted, 0, "delete step must not run");

    // Teardown is unconditional once the flavor exists.
    assert_eq!(state.counters.flavors_created, 1);
    assert_eq!(state.counters.flavors_deleted, 1);
    assert_eq!(state.flavor_count(), 0);
}

#[tokio::test]
async fn bad_deployment_state_fails_the_status_check() {
    init_tracing();

    let platform = MockPlatform::start(PlatformState {
        deployment_state: "completed_w_errors",
        ..PlatformState::default()
    })
    .await;
    let config = test_config(&platform);
    let clients = Clients::from_config(&config).unwrap();

    let outcome = run_scenario(ScenarioKind::Apache, &clients, &config).await;

    let failure = match outcome {
        ScenarioOutcome::Failed { failure, .. } => failure,
        other => panic!("expected failure, got: {other:?}"),
    };
    assert_eq!(failure.step, 6);
    assert!(failure.message.contains("completed_w_errors"), "{}", failure.message);

    // Flavor still released.
    let state = platform.state();
    assert_eq!(state.counters.flavors_deleted, 1);
}

#[tokio::test]
async fn unreachable_platform_is_a_failure_not_a_skip() {
    init_tracing();

    // Nothing is listening on this port.
    let config = RunnerConfig {
        murano_url: "http://127.0.0.1:9".to_string(),
        compute_url: "http://127.0.0.1:9".to_string(),
        image_url: "http://127.0.0.1:9".to_string(),
        deploy_timeout: Duration::from_secs(2),
        poll_interval: Duration::from_millis(50),
        ..RunnerConfig::default()
    };
    let clients = Clients::from_config(&config).unwrap();

    let outcome = run_scenario(ScenarioKind::Apache, &clients, &config).await;

    match outcome {
        ScenarioOutcome::Failed { failure, .. } => {
            assert_eq!(failure.step, 0, "precondition queries failed, not a numbered step");
        }
        other => panic!("expected failure, got: {other:?}"),
    }
}
