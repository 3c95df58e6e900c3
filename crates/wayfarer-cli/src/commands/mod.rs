// Handlers for the CLI subcommands. main.rs parses arguments, loads the
// route graph once and dispatches here.

pub mod evaluate;
pub mod locations;
pub mod paths;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use wayfarer_lib::{
    load_routes_from_path, load_traffic_from_path, resolve_data_paths, Error as RouteError,
    RouteGraph, SearchLimits, TransportMode,
};

/// Caps shared by the enumerating subcommands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LimitArgs {
    /// Skip paths with more than this many routes.
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Stop after this many paths.
    #[arg(long)]
    pub max_paths: Option<usize>,
}

impl From<LimitArgs> for SearchLimits {
    fn from(args: LimitArgs) -> Self {
        SearchLimits {
            max_depth: args.max_depth,
            max_paths: args.max_paths,
        }
    }
}

/// Resolve the data files and build the route graph, applying traffic windows
/// when a traffic file is available.
pub fn load_graph(routes: Option<&Path>, traffic: Option<&Path>) -> Result<RouteGraph> {
    let paths = resolve_data_paths(routes, traffic).context("failed to locate route data")?;

    let mut graph = RouteGraph::new();
    let report = load_routes_from_path(&mut graph, &paths.routes)
        .with_context(|| format!("failed to load routes from {}", paths.routes.display()))?;
    if !report.rejected.is_empty() {
        eprintln!(
            "Warning: skipped {} malformed line(s) in {}.",
            report.rejected.len(),
            paths.routes.display()
        );
    }

    if let Some(traffic_path) = &paths.traffic {
        let report = load_traffic_from_path(&mut graph, traffic_path).with_context(|| {
            format!("failed to load traffic from {}", traffic_path.display())
        })?;
        info!(
            accepted = report.accepted,
            unmatched = report.unmatched,
            rejected = report.rejected.len(),
            "applied traffic windows"
        );
    }

    Ok(graph)
}

/// Turn lookup failures into user-facing messages; other errors pass through.
pub fn describe_failure(err: RouteError, mode: TransportMode) -> anyhow::Error {
    match err {
        RouteError::UnknownLocation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_location_message(&name, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => anyhow::anyhow!(
            "No {} route found from {} to {}.",
            mode,
            start,
            goal
        ),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{}'?", only)),
        many => {
            let quoted: Vec<String> = many.iter().map(|s| format!("'{}'", s)).collect();
            message.push_str(&format!(" Did you mean one of: {}?", quoted.join(", ")));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_message_lists_suggestions() {
        let single = format_unknown_location_message("Antgua", &["Antigua".to_string()]);
        assert_eq!(single, "Unknown location 'Antgua'. Did you mean 'Antigua'?");

        let many = format_unknown_location_message(
            "Tec",
            &["Tecpan".to_string(), "Tikal".to_string()],
        );
        assert_eq!(
            many,
            "Unknown location 'Tec'. Did you mean one of: 'Tecpan', 'Tikal'?"
        );

        assert_eq!(
            format_unknown_location_message("Nowhere", &[]),
            "Unknown location 'Nowhere'."
        );
    }

    #[test]
    fn route_not_found_names_the_mode() {
        let err = describe_failure(
            RouteError::RouteNotFound {
                start: "Flores".to_string(),
                goal: "Tecpan".to_string(),
            },
            TransportMode::Walking,
        );
        assert_eq!(err.to_string(), "No walking route found from Flores to Tecpan.");
    }

    #[test]
    fn limit_args_convert_to_search_limits() {
        let limits: SearchLimits = LimitArgs {
            max_depth: Some(4),
            max_paths: None,
        }
        .into();
        assert_eq!(limits.max_depth, Some(4));
        assert_eq!(limits.max_paths, None);
    }
}
