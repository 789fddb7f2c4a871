//! ci-actions entry point.
//!
//! This binary is the composition root for the whole workspace.
//! Responsibilities:
//!
//! 1. **Parse configuration**: action inputs from `INPUT_*` variables or flags.
//! 2. **Wire observability**: configure `tracing-subscriber` with a text or
//!    JSON layer and, when configured, an OpenTelemetry OTLP exporter. All
//!    `tracing` spans and events emitted by every crate flow through it.
//! 3. **Construct infrastructure**: create the `GithubClient` and inject it
//!    into `SlaLabelRun` as both issue source and label mutator.
//! 4. **Report the outcome**: a failure is printed as a workflow `::error::`
//!    command and the process exits with status 1.

mod commands;
mod config;
mod observability;
mod workflow;

use std::process::ExitCode;

use clap::Parser;
use sla::RunId;
use tracing::{info_span, Instrument};

use crate::config::{Cli, Command};
use crate::workflow::StepOutputs;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match observability::init(cli.log_format) {
        Ok(telemetry) => telemetry,
        Err(err) => {
            eprintln!("{err:#}");
            observability::Telemetry::default()
        }
    };

    let run_id = RunId::new_random();
    let span = info_span!("ci_actions", run_id = %run_id);
    let outcome = dispatch(cli.command).instrument(span).await;

    telemetry.shutdown();

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Action failed");
            workflow::set_failed(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Command) -> anyhow::Result<()> {
    match command {
        Command::SlaLabels(args) => commands::sla_labels::execute(args).await,
        Command::MergeManifests(args) => {
            commands::merge_manifests::execute(args, &StepOutputs::from_env())
        }
    }
}
