//! Output formatting for location listings, path listings and evaluations.
//!
//! Text renderers write through a [`ColorPalette`] so the same code serves
//! colored terminals, `NO_COLOR` sessions and tests. JSON output serializes
//! the library types directly.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use wayfarer_lib::routing::LABEL_SEPARATOR;
use wayfarer_lib::{RouteEvaluation, RouteGraph, RoutePath, ScoredPath, TransportMode};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Render every registered location with its neighbours to stdout.
    pub fn render_locations(self, graph: &RouteGraph) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Text => write_locations_text(&mut stdout, graph, ColorPalette::detect()),
            OutputFormat::Json => write_json(&mut stdout, &location_entries(graph)),
        }
    }

    /// Render an enumerated path listing to stdout.
    pub fn render_paths(self, listing: &PathListing<'_>) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Text => write_paths_text(&mut stdout, listing, ColorPalette::detect()),
            OutputFormat::Json => write_json(&mut stdout, listing),
        }
    }

    /// Render a best/worst evaluation to stdout.
    pub fn render_evaluation(self, evaluation: &RouteEvaluation) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        match self {
            OutputFormat::Text => {
                write_evaluation_text(&mut stdout, evaluation, ColorPalette::detect())
            }
            OutputFormat::Json => write_json(&mut stdout, evaluation),
        }
    }
}

/// A location and the names of every location sharing a route with it.
#[derive(Debug, Clone, Serialize)]
pub struct LocationEntry<'a> {
    pub name: &'a str,
    pub neighbours: &'a [String],
}

fn location_entries(graph: &RouteGraph) -> Vec<LocationEntry<'_>> {
    graph
        .locations()
        .iter()
        .map(|location| LocationEntry {
            name: location.name(),
            neighbours: graph.neighbours(location.name()),
        })
        .collect()
}

/// One hop of a listed path.
#[derive(Debug, Clone, Serialize)]
pub struct Hop<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub distance: u32,
}

/// A listed path with its per-hop distances.
#[derive(Debug, Clone, Serialize)]
pub struct PathEntry<'a> {
    pub hops: Vec<Hop<'a>>,
    pub total_distance: u64,
}

impl<'a> PathEntry<'a> {
    pub fn new(path: &'a RoutePath) -> Self {
        let hops: Vec<Hop<'a>> = path
            .routes()
            .iter()
            .map(|route| Hop {
                origin: route.origin().name(),
                destination: route.destination().name(),
                distance: route.costs().distance,
            })
            .collect();
        let total_distance = hops.iter().map(|hop| u64::from(hop.distance)).sum();
        Self {
            hops,
            total_distance,
        }
    }
}

/// Every simple path between two locations, in enumeration order.
#[derive(Debug, Clone, Serialize)]
pub struct PathListing<'a> {
    pub start: &'a str,
    pub goal: &'a str,
    pub mode: TransportMode,
    pub paths: Vec<PathEntry<'a>>,
}

impl<'a> PathListing<'a> {
    pub fn new(start: &'a str, goal: &'a str, mode: TransportMode, paths: &'a [RoutePath]) -> Self {
        Self {
            start,
            goal,
            mode,
            paths: paths.iter().map(PathEntry::new).collect(),
        }
    }
}

/// Serialize `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

pub fn write_locations_text<W: Write>(
    out: &mut W,
    graph: &RouteGraph,
    palette: ColorPalette,
) -> io::Result<()> {
    writeln!(out, "Locations ({}):", graph.location_count())?;
    for entry in location_entries(graph) {
        let neighbours = if entry.neighbours.is_empty() {
            format!("{}(no routes){}", palette.muted, palette.reset)
        } else {
            entry.neighbours.join(", ")
        };
        writeln!(
            out,
            " - {}{}{}: {}",
            palette.heading, entry.name, palette.reset, neighbours
        )?;
    }
    Ok(())
}

pub fn write_paths_text<W: Write>(
    out: &mut W,
    listing: &PathListing<'_>,
    palette: ColorPalette,
) -> io::Result<()> {
    let noun = if listing.paths.len() == 1 { "path" } else { "paths" };
    writeln!(
        out,
        "{} {} from {}{}{} to {}{}{} ({}):",
        listing.paths.len(),
        noun,
        palette.heading,
        listing.start,
        palette.reset,
        palette.heading,
        listing.goal,
        palette.reset,
        listing.mode
    )?;
    for (index, entry) in listing.paths.iter().enumerate() {
        writeln!(
            out,
            "\nOption {} (total distance {}):",
            index + 1,
            entry.total_distance
        )?;
        for hop in &entry.hops {
            writeln!(
                out,
                " - {}{}{} {}({}){}",
                hop.origin,
                LABEL_SEPARATOR,
                hop.destination,
                palette.muted,
                hop.distance,
                palette.reset
            )?;
        }
    }
    Ok(())
}

pub fn write_evaluation_text<W: Write>(
    out: &mut W,
    evaluation: &RouteEvaluation,
    palette: ColorPalette,
) -> io::Result<()> {
    let criterion = match evaluation.cost {
        Some(cost) => match cost.secondary {
            Some(secondary) => format!("criterion: {} + {}", cost.primary, secondary),
            None => format!("criterion: {}", cost.primary),
        },
        None => "custom metric".to_string(),
    };
    writeln!(
        out,
        "Routes from {}{}{} to {}{}{} ({}; {}):",
        palette.heading,
        evaluation.start,
        palette.reset,
        palette.heading,
        evaluation.goal,
        palette.reset,
        evaluation.mode,
        criterion
    )?;

    write_extreme(out, "Best: ", evaluation.best.as_ref(), palette.best, palette)?;
    write_extreme(out, "Worst:", evaluation.worst.as_ref(), palette.worst, palette)?;

    writeln!(out, "\nCandidates ({}):", evaluation.candidates.len())?;
    for candidate in &evaluation.candidates {
        writeln!(out, " - {}", candidate.label)?;
    }
    Ok(())
}

fn write_extreme<W: Write>(
    out: &mut W,
    heading: &str,
    scored: Option<&ScoredPath>,
    color: &str,
    palette: ColorPalette,
) -> io::Result<()> {
    match scored {
        Some(scored) => writeln!(out, "{heading} {color}{}{}", scored.label, palette.reset),
        None => writeln!(out, "{heading} {}none{}", palette.muted, palette.reset),
    }
}
