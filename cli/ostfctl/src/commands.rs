//! Command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};

use ostf_runner::{run_scenario, Clients, RunnerConfig, ScenarioKind, ScenarioOutcome};

use crate::output::{print_config_error, print_outcome, OutputFormat};

/// Exit code for a passed run.
const EXIT_PASS: i32 = 0;
/// Exit code when any scenario failed.
const EXIT_FAIL: i32 = 1;
/// Exit code when preconditions were not met and nothing failed.
const EXIT_SKIP: i32 = 2;

/// Murano health-check runner.
#[derive(Debug, Parser)]
#[command(name = "ostf", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run health-check scenarios.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Which scenario to run.
    scenario: ScenarioArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    /// Deploy a single Apache service.
    Apache,
    /// Deploy Apache + MySQL + WordPress.
    Wordpress,
    /// Run both scenarios in order.
    All,
}

impl ScenarioArg {
    fn kinds(self) -> Vec<ScenarioKind> {
        match self {
            Self::Apache => vec![ScenarioKind::Apache],
            Self::Wordpress => vec![ScenarioKind::Wordpress],
            Self::All => vec![ScenarioKind::Apache, ScenarioKind::Wordpress],
        }
    }
}

impl Cli {
    /// Run the command and return the process exit code.
    pub async fn run(self) -> i32 {
        match self.command {
            Command::Run(args) => run(args).await,
        }
    }
}

async fn run(args: RunArgs) -> i32 {
    let config = RunnerConfig::from_env();
    let clients = match Clients::from_config(&config) {
        Ok(clients) => clients,
        Err(e) => {
            print_config_error(&e);
            return EXIT_FAIL;
        }
    };

    let mut code = EXIT_PASS;
    for kind in args.scenario.kinds() {
        let outcome = run_scenario(kind, &clients, &config).await;
        print_outcome(kind.name(), &outcome, args.output);

        // Failure outranks skip; skip outranks pass.
        match outcome {
            ScenarioOutcome::Failed { .. } => code = EXIT_FAIL,
            ScenarioOutcome::Skipped { .. } if code == EXIT_PASS => code = EXIT_SKIP,
            _ => {}
        }
    }
    code
}
