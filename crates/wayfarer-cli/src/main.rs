mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfarer_cli::output::OutputFormat;

use crate::commands::evaluate::{handle_evaluate_command, EvaluateCommandArgs};
use crate::commands::locations::handle_locations_command;
use crate::commands::paths::{handle_paths_command, PathsCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Enumerate and rank routes between locations")]
struct Cli {
    /// Route catalog file. Falls back to WAYFARER_ROUTES, then the data directory.
    #[arg(long, global = true)]
    routes: Option<PathBuf>,

    /// Traffic window file. Falls back to WAYFARER_TRAFFIC, then a traffic.txt
    /// next to the route catalog.
    #[arg(long, global = true)]
    traffic: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered locations with their neighbours.
    Locations,
    /// List every simple path between two locations with per-hop distances.
    Paths(PathsCommandArgs),
    /// Pick the best and worst path between two locations under a cost criterion.
    Evaluate(EvaluateCommandArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let graph = commands::load_graph(cli.routes.as_deref(), cli.traffic.as_deref())?;

    match &cli.command {
        Command::Locations => handle_locations_command(&graph, cli.format),
        Command::Paths(args) => handle_paths_command(&graph, args, cli.format),
        Command::Evaluate(args) => handle_evaluate_command(&graph, args, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
