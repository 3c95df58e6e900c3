//! Location listing.

use anyhow::{Context, Result};

use wayfarer_lib::RouteGraph;

use wayfarer_cli::output::OutputFormat;

/// Print every registered location with its neighbours.
pub fn handle_locations_command(graph: &RouteGraph, format: OutputFormat) -> Result<()> {
    format
        .render_locations(graph)
        .context("failed to write location listing")
}
