//! Output formatting for scenario results.

use clap::ValueEnum;
use colored::Colorize;
use tabled::{Table, Tabled};

use ostf_runner::{ScenarioOutcome, ScenarioReport};

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: u32,

    #[tabled(rename = "Description")]
    description: String,

    #[tabled(rename = "Duration")]
    duration: String,
}

fn steps_table(report: &ScenarioReport) -> String {
    let rows: Vec<StepRow> = report
        .steps
        .iter()
        .map(|s| StepRow {
            step: s.step,
            description: s.description.clone(),
            duration: format!("{:.1}s", s.duration_ms as f64 / 1000.0),
        })
        .collect();
    Table::new(rows).to_string()
}

/// Print one scenario outcome.
pub fn print_outcome(scenario: &str, outcome: &ScenarioOutcome, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
        OutputFormat::Table => match outcome {
            ScenarioOutcome::Passed { report } => {
                println!("{}", steps_table(report));
                println!("{} {scenario}", "Passed:".green().bold());
            }
            ScenarioOutcome::Skipped { reason } => {
                println!("{} {scenario}: {reason}", "Skipped:".yellow().bold());
            }
            ScenarioOutcome::Failed { failure, report } => {
                if !report.steps.is_empty() {
                    println!("{}", steps_table(report));
                }
                println!(
                    "{} {scenario} at step {}: {}",
                    "Failed:".red().bold(),
                    failure.step,
                    failure.message
                );
            }
        },
    }
}

/// Print a client construction error.
pub fn print_config_error(err: &dyn std::error::Error) {
    eprintln!("{} {err}", "Error:".red().bold());
    eprintln!(
        "\n{}",
        "Hint: check the OSTF_MURANO_URL / OSTF_COMPUTE_URL / OSTF_IMAGE_URL settings.".yellow()
    );
}
