//! End-to-end happy paths for both scenarios against the mock platform.
//!
//! ## Running
//!
//! ```bash
//! cargo test -p ostf-e2e --test linux_services
//! ```

use std::time::Duration;

use ostf_runner::{run_scenario, Clients, RunnerConfig, ScenarioKind, ScenarioOutcome};

#[path = "support.rs"]
mod support;

use support::{init_tracing, spawn_instance_server, MockPlatform, PlatformState};

fn test_config(platform: &MockPlatform, instance_port: u16) -> RunnerConfig {
    RunnerConfig {
        murano_url: platform.uri.clone(),
        compute_url: platform.uri.clone(),
        image_url: platform.uri.clone(),
        deploy_timeout: Duration::from_secs(10),
        poll_interval: Duration::from_millis(50),
        web_ports: vec![instance_port],
        ..RunnerConfig::default()
    }
}

#[tokio::test]
async fn apache_scenario_passes_end_to_end() {
    init_tracing();

    let platform = MockPlatform::start(PlatformState::default()).await;
    let instance_port = spawn_instance_server().await;
    let config = test_config(&platform, instance_port);
    let clients = Clients::from_config(&config).unwrap();

    let outcome = run_scenario(ScenarioKind::Apache, &clients, &config).await;

    let report = match outcome {
        ScenarioOutcome::Passed { report } => report,
        other => panic!("expected pass, got: {other:?}"),
    };

    assert_eq!(report.scenario, "deploy_apache_service");
    assert_eq!(report.steps.len(), 8);
    let numbers: Vec<u32> = report.steps.iter().map(|s| s.step).collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<_>>());

    let state = platform.state();
    assert_eq!(state.counters.envs_created, 1);
    assert_eq!(state.counters.sessions_created, 1);
    assert_eq!(state.counters.services_created, 1);
    assert_eq!(state.counters.deploys_started, 1);
    assert_eq!(state.counters.envs_deleted, 1);
    assert_eq!(state.environment_count(), 0, "environment must not survive the run");

    // Flavor lifecycle is paired even on success.
    assert_eq!(state.counters.flavors_created, 1);
    assert_eq!(state.counters.flavors_deleted, 1);
    assert_eq!(state.flavor_count(), 0);
}

#[tokio::test]
async fn wordpress_scenario_passes_end_to_end() {
    init_tracing();

    let platform = MockPlatform::start(PlatformState::default()).await;
    let instance_port = spawn_instance_server().await;
    let config = test_config(&platform, instance_port);
    let clients = Clients::from_config(&config).unwrap();

    let outcome = run_scenario(ScenarioKind::Wordpress, &clients, &config).await;

    let report = match outcome {
        ScenarioOutcome::Passed { report } => report,
        other => panic!("expected pass, got: {other:?}"),
    };

    assert_eq!(report.scenario, "deploy_wordpress_app");
    assert_eq!(report.steps.len(), 10);

    let state = platform.state();
    // Apache, MySQL, and WordPress were all added before deploying.
    assert_eq!(state.counters.services_created, 3);
    assert_eq!(state.counters.deploys_started, 1);
    assert_eq!(state.environment_count(), 0);
    assert_eq!(state.flavor_count(), 0);
}

#[tokio::test]
async fn scenarios_run_back_to_back_without_leaking_resources() {
    init_tracing();

    let platform = MockPlatform::start(PlatformState::default()).await;
    let instance_port = spawn_instance_server().await;
    let config = test_config(&platform, instance_port);
    let clients = Clients::from_config(&config).unwrap();

    let first = run_scenario(ScenarioKind::Apache, &clients, &config).await;
    let second = run_scenario(ScenarioKind::Wordpress, &clients, &config).await;
    assert!(first.is_passed());
    assert!(second.is_passed());

    let state = platform.state();
    assert_eq!(state.counters.flavors_created, 2);
    assert_eq!(state.counters.flavors_deleted, 2);
    assert_eq!(state.environment_count(), 0);
    assert_eq!(state.flavor_count(), 0);
}
