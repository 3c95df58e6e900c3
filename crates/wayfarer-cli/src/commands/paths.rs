//! Path listing: every simple path with per-hop distances.

use anyhow::{Context, Result};
use clap::Args;

use wayfarer_lib::{
    find_all_simple_paths_with_limits, graph_for_mode, resolve_location, Error as RouteError,
    RouteGraph, TransportMode,
};

use crate::commands::{describe_failure, LimitArgs};
use wayfarer_cli::output::{OutputFormat, PathListing};

/// Arguments for the paths command.
#[derive(Args, Debug, Clone)]
pub struct PathsCommandArgs {
    /// Starting location name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location name.
    #[arg(long = "to")]
    pub to: String,
    /// Walking also follows routes against their stored direction.
    #[arg(long, default_value_t = TransportMode::Vehicle)]
    pub mode: TransportMode,
    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Enumerate and print every simple path between two locations.
pub fn handle_paths_command(
    graph: &RouteGraph,
    args: &PathsCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    for name in [&args.from, &args.to] {
        resolve_location(graph, name).map_err(|err| describe_failure(err, args.mode))?;
    }

    let search_graph = graph_for_mode(graph, args.mode);
    let paths =
        find_all_simple_paths_with_limits(&search_graph, &args.from, &args.to, args.limits.into());
    if paths.is_empty() {
        return Err(describe_failure(
            RouteError::RouteNotFound {
                start: args.from.clone(),
                goal: args.to.clone(),
            },
            args.mode,
        ));
    }

    let listing = PathListing::new(&args.from, &args.to, args.mode, &paths);
    format
        .render_paths(&listing)
        .context("failed to write path listing")
}
