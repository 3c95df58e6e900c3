//! Best/worst path selection.

use anyhow::{Context, Result};
use clap::Args;

use wayfarer_lib::{evaluate_route, Criterion, EvaluationRequest, RouteGraph, TransportMode};

use crate::commands::{describe_failure, LimitArgs};
use wayfarer_cli::output::OutputFormat;

/// Arguments for the evaluate command.
#[derive(Args, Debug, Clone)]
pub struct EvaluateCommandArgs {
    /// Starting location name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location name.
    #[arg(long = "to")]
    pub to: String,
    /// Transport mode: vehicle or walking.
    #[arg(long)]
    pub mode: TransportMode,
    /// Primary cost criterion: fuel, physical_wear or distance.
    #[arg(long)]
    pub criterion: Criterion,
    /// Secondary criterion. Added to the primary for vehicles; replaces it when walking.
    #[arg(long)]
    pub secondary: Option<Criterion>,
    #[command(flatten)]
    pub limits: LimitArgs,
}

impl EvaluateCommandArgs {
    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> EvaluationRequest {
        let mut request =
            EvaluationRequest::new(self.from.clone(), self.to.clone(), self.mode, self.criterion)
                .with_limits(self.limits.into());
        if let Some(secondary) = self.secondary {
            request = request.with_secondary(secondary);
        }
        request
    }
}

/// Evaluate every candidate path and print the best and worst.
pub fn handle_evaluate_command(
    graph: &RouteGraph,
    args: &EvaluateCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let request = args.to_request();
    let evaluation =
        evaluate_route(graph, &request).map_err(|err| describe_failure(err, args.mode))?;

    format
        .render_evaluation(&evaluation)
        .context("failed to write evaluation")
}
