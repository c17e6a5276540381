//! The two health-check scenarios.
//!
//! Step numbering, timeouts, and failure messages are part of the observable
//! contract: a failure report always names the step that broke.

use std::time::Duration;

use ostf_clients::{ApiError, ComputeClient, ImageClient, MuranoClient};
use ostf_types::{rand_name, Flavor, Image, InstanceSpec, ServiceDescriptor};
use tracing::info;

use crate::checks;
use crate::config::RunnerConfig;
use crate::gate::{self, GateDecision, GateReady};
use crate::step::{ScenarioOutcome, StepFailure, StepLog};

/// Per-step budget for plain API calls.
const API_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment creation gets longer: it is the first call to hit the Murano
/// API and absorbs cold-start latency.
const CREATE_ENV_TIMEOUT: Duration = Duration::from_secs(15);

/// Budget for the deployed web ports to start answering.
const PORTS_CHECK_TIMEOUT: Duration = Duration::from_secs(300);

/// Budget for the application path check.
const PATH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed credentials the CMS application uses to reach its database.
const CMS_DB_NAME: &str = "wordpress";
const CMS_DB_USER: &str = "wp_user";
const CMS_DB_PASSWORD: &str = "U0yleh@c";

/// Which scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Scenario A: deploy a single Apache service (8 steps).
    Apache,

    /// Scenario B: deploy Apache + MySQL + WordPress (10 steps).
    Wordpress,
}

impl ScenarioKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apache => "deploy_apache_service",
            Self::Wordpress => "deploy_wordpress_app",
        }
    }
}

/// The three API clients a run needs.
#[derive(Debug, Clone)]
pub struct Clients {
    pub murano: MuranoClient,
    pub compute: ComputeClient,
    pub images: ImageClient,
}

impl Clients {
    /// Build all clients from one config.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, ApiError> {
        let token = config.auth_token.as_deref();
        Ok(Self {
            murano: MuranoClient::new(&config.murano_url, token)?,
            compute: ComputeClient::new(&config.compute_url, token)?,
            images: ImageClient::new(&config.image_url, token)?,
        })
    }
}

/// Run one scenario end to end: gate, steps, teardown.
///
/// The flavor created by the gate is released whatever the steps did; a
/// skipped run releases nothing because nothing was created.
pub async fn run_scenario(
    kind: ScenarioKind,
    clients: &Clients,
    config: &RunnerConfig,
) -> ScenarioOutcome {
    info!(scenario = kind.name(), "starting scenario");

    let decision = match gate::check_preconditions(&clients.compute, &clients.images, config).await
    {
        Ok(decision) => decision,
        Err(e) => {
            let log = StepLog::new(kind.name());
            return ScenarioOutcome::Failed {
                failure: StepFailure {
                    step: 0,
                    description: "checking preconditions".to_string(),
                    message: format!("Can't query compute capacity or images. {e}"),
                },
                report: log.finish(),
            };
        }
    };

    let GateReady {
        flavor,
        image,
        guard,
    } = match decision {
        GateDecision::Ready(ready) => ready,
        GateDecision::Skip(reason) => {
            info!(scenario = kind.name(), %reason, "scenario skipped");
            return ScenarioOutcome::Skipped { reason };
        }
    };

    let mut log = StepLog::new(kind.name());
    let result = match kind {
        ScenarioKind::Apache => {
            deploy_apache_service(clients, config, &flavor, &image, &mut log).await
        }
        ScenarioKind::Wordpress => {
            deploy_wordpress_app(clients, config, &flavor, &image, &mut log).await
        }
    };

    // Teardown runs on every path past the gate.
    guard.release().await;

    match result {
        Ok(()) => {
            info!(scenario = kind.name(), "scenario passed");
            ScenarioOutcome::Passed {
                report: log.finish(),
            }
        }
        Err(failure) => {
            info!(scenario = kind.name(), step = failure.step, "scenario failed");
            ScenarioOutcome::Failed {
                failure,
                report: log.finish(),
            }
        }
    }
}

fn web_server(flavor: &Flavor, image: &Image, enable_php: bool) -> ServiceDescriptor {
    ServiceDescriptor::WebServer {
        name: rand_name("ostf-murano-web"),
        instance: instance_spec(flavor, image),
        enable_php,
    }
}

fn instance_spec(flavor: &Flavor, image: &Image) -> InstanceSpec {
    InstanceSpec {
        flavor: flavor.name.clone(),
        image: image.name.clone(),
        name: rand_name("ostf-murano-vm"),
        assign_floating_ip: true,
    }
}

/// Scenario A: deploy a single Apache service.
///
/// 1. create environment
/// 2. create session
/// 3. create Apache service
/// 4. deploy session
/// 5. wait for the deployment to finish
/// 6. check deployments status
/// 7. check the web ports are open
/// 8. delete environment
async fn deploy_apache_service(
    clients: &Clients,
    config: &RunnerConfig,
    flavor: &Flavor,
    image: &Image,
    log: &mut StepLog,
) -> Result<(), StepFailure> {
    let murano = &clients.murano;
    let env_name = rand_name("ostf-murano-env");

    let env = log
        .run(
            CREATE_ENV_TIMEOUT,
            1,
            "Can't create environment. Murano API is not available. ",
            "creating environment",
            murano.create_environment(&env_name),
        )
        .await?;

    let session = log
        .run(
            API_CALL_TIMEOUT,
            2,
            "User can't create session for environment. ",
            "creating session",
            murano.create_session(&env.id),
        )
        .await?;

    log.run(
        API_CALL_TIMEOUT,
        3,
        "User can't create service. ",
        "creating Apache service",
        murano.create_service(&env.id, &session.id, &web_server(flavor, image, false)),
    )
    .await?;

    log.run(
        API_CALL_TIMEOUT,
        4,
        "User can't deploy session. ",
        "sending session on deployment",
        murano.deploy_session(&env.id, &session.id),
    )
    .await?;

    let env = log
        .run(
            config.deploy_timeout,
            5,
            "Deployment was not completed correctly. ",
            "waiting for deployment",
            checks::wait_for_deploy(murano, &env.id, config.poll_interval),
        )
        .await?;

    log.run(
        API_CALL_TIMEOUT,
        6,
        "Deployment was not completed correctly. ",
        "checking deployments status",
        checks::deployments_status_check(murano, &env.id),
    )
    .await?;

    log.run(
        PORTS_CHECK_TIMEOUT,
        7,
        "Deployment was not completed correctly. ",
        "checking that needed ports are open",
        checks::ports_check(&env, &config.web_ports, config.poll_interval),
    )
    .await?;

    log.run(
        API_CALL_TIMEOUT,
        8,
        "Can't delete environment. ",
        "deleting environment",
        murano.delete_environment(&env.id),
    )
    .await?;

    Ok(())
}

/// Scenario B: deploy a WordPress application with its dependencies.
///
/// 1. create environment
/// 2. create session
/// 3. create Apache service (PHP enabled)
/// 4. create MySQL service
/// 5. create WordPress service referencing both
/// 6. deploy session
/// 7. wait for the deployment to finish
/// 8. check deployments status
/// 9. check the WordPress path answers
/// 10. delete environment
async fn deploy_wordpress_app(
    clients: &Clients,
    config: &RunnerConfig,
    flavor: &Flavor,
    image: &Image,
    log: &mut StepLog,
) -> Result<(), StepFailure> {
    let murano = &clients.murano;
    let env_name = rand_name("ostf-murano-env");

    let env = log
        .run(
            CREATE_ENV_TIMEOUT,
            1,
            "Can't create environment. Murano API is not available. ",
            "creating environment",
            murano.create_environment(&env_name),
        )
        .await?;

    let session = log
        .run(
            API_CALL_TIMEOUT,
            2,
            "User can't create session for environment. ",
            "creating session",
            murano.create_session(&env.id),
        )
        .await?;

    let apache = log
        .run(
            API_CALL_TIMEOUT,
            3,
            "User can't create service Apache. ",
            "creating Apache service",
            murano.create_service(&env.id, &session.id, &web_server(flavor, image, true)),
        )
        .await?;

    let mysql = log
        .run(
            API_CALL_TIMEOUT,
            4,
            "User can't create service MySQL. ",
            "creating MySQL service",
            murano.create_service(
                &env.id,
                &session.id,
                &ServiceDescriptor::Database {
                    name: rand_name("ostf-murano-db"),
                    instance: instance_spec(flavor, image),
                    database: rand_name("ostf"),
                    username: rand_name("ostf"),
                    password: rand_name("Ost1@"),
                },
            ),
        )
        .await?;

    log.run(
        API_CALL_TIMEOUT,
        5,
        "User can't create service WordPress. ",
        "creating WordPress service",
        murano.create_service(
            &env.id,
            &session.id,
            &ServiceDescriptor::CmsApp {
                name: rand_name("ostf-murano-wp"),
                server: apache,
                database: mysql,
                db_name: CMS_DB_NAME.to_string(),
                db_user: CMS_DB_USER.to_string(),
                db_password: CMS_DB_PASSWORD.to_string(),
            },
        ),
    )
    .await?;

    log.run(
        API_CALL_TIMEOUT,
        6,
        "User can't deploy session. ",
        "sending session on deployment",
        murano.deploy_session(&env.id, &session.id),
    )
    .await?;

    let env = log
        .run(
            config.deploy_timeout,
            7,
            "Deployment was not completed correctly. ",
            "waiting for deployment",
            checks::wait_for_deploy(murano, &env.id, config.poll_interval),
        )
        .await?;

    log.run(
        API_CALL_TIMEOUT,
        8,
        "Deployment was not completed correctly. ",
        "checking deployments status",
        checks::deployments_status_check(murano, &env.id),
    )
    .await?;

    let web_port = config.web_ports.first().copied().unwrap_or(80);
    log.run(
        PATH_CHECK_TIMEOUT,
        9,
        "Path to WordPress is unavailable. ",
        "checking path availability",
        checks::check_path(&env, "wordpress", web_port),
    )
    .await?;

    log.run(
        API_CALL_TIMEOUT,
        10,
        "Can't delete environment. ",
        "deleting environment",
        murano.delete_environment(&env.id),
    )
    .await?;

    Ok(())
}
