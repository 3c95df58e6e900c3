//! Route evaluation over the full set of simple paths.
//!
//! This module provides:
//! - [`TransportMode`] - vehicle (directed) or walking (undirected) travel
//! - [`Criterion`], [`CompositeCost`], [`EdgeCost`] - how each route is scored
//! - [`EvaluationRequest`] - a best/worst route query
//! - [`RouteEvaluation`] - extremes plus every scored candidate
//! - [`select_best_and_worst`] - main entry point
//!
//! Unknown or disconnected locations produce an empty evaluation rather than
//! an error. [`evaluate_route`] is the strict variant that distinguishes the
//! two cases for callers that want an error.
//!
//! # Example
//!
//! ```ignore
//! use wayfarer_lib::{select_best_and_worst, Criterion, EvaluationRequest, TransportMode};
//!
//! let request = EvaluationRequest::new("A", "C", TransportMode::Vehicle, Criterion::Distance);
//! let evaluation = select_best_and_worst(&graph, &request);
//! println!("{}", evaluation.best_label().unwrap_or("no route"));
//! ```

mod cost;

pub use cost::{CompositeCost, Criterion, EdgeCost};

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Location, RouteGraph};
use crate::orientation::to_undirected;
use crate::path::{find_all_simple_paths_with_limits, RoutePath, SearchLimits};

/// Separator placed between location names in path labels.
pub const LABEL_SEPARATOR: &str = " -> ";

/// Number of suggestions offered for an unknown location.
const MAX_SUGGESTIONS: usize = 3;

/// How the traveller moves through the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Routes are followed in their stored direction only.
    #[default]
    Vehicle,
    /// Every route may be walked in either direction.
    Walking,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TransportMode::Vehicle => "vehicle",
            TransportMode::Walking => "walking",
        };
        f.write_str(value)
    }
}

impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vehicle" | "car" => Ok(TransportMode::Vehicle),
            "walking" | "walk" | "foot" => Ok(TransportMode::Walking),
            _ => Err(Error::UnknownTransportMode {
                name: s.to_string(),
            }),
        }
    }
}

/// Graph to search for `mode`: the graph itself, or an undirected copy for walking.
pub fn graph_for_mode(graph: &RouteGraph, mode: TransportMode) -> Cow<'_, RouteGraph> {
    match mode {
        TransportMode::Vehicle => Cow::Borrowed(graph),
        TransportMode::Walking => Cow::Owned(to_undirected(graph)),
    }
}

/// Best/worst route query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub start: String,
    pub goal: String,
    pub mode: TransportMode,
    pub primary: Criterion,
    pub secondary: Option<Criterion>,
    pub limits: SearchLimits,
}

impl EvaluationRequest {
    pub fn new(
        start: impl Into<String>,
        goal: impl Into<String>,
        mode: TransportMode,
        primary: Criterion,
    ) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            mode,
            primary,
            secondary: None,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_secondary(mut self, criterion: Criterion) -> Self {
        self.secondary = Some(criterion);
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Cost function described by this request.
    pub fn cost(&self) -> CompositeCost {
        CompositeCost::new(self.mode, self.primary, self.secondary)
    }
}

/// Directed `(origin, destination)` pair identifying an edge in a diagram.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeKey {
    pub origin: String,
    pub destination: String,
}

/// Candidate path with its score and display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPath {
    pub score: f64,
    pub label: String,
    pub path: RoutePath,
}

impl ScoredPath {
    pub fn new(path: RoutePath, score: f64) -> Self {
        let label = path_label(&path, score);
        Self { score, label, path }
    }

    /// Edges to emphasise when drawing this path.
    pub fn highlight(&self) -> BTreeSet<EdgeKey> {
        self.path
            .routes()
            .iter()
            .map(|route| EdgeKey {
                origin: route.origin().name().to_string(),
                destination: route.destination().name().to_string(),
            })
            .collect()
    }
}

/// `"A -> B -> C (8)"`: origins in order, the final destination, then the score.
pub fn path_label(path: &RoutePath, score: f64) -> String {
    format!("{} ({})", path.nodes().join(LABEL_SEPARATOR), score)
}

fn finite_or_null<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

/// Outcome of a best/worst query.
///
/// With no candidates `best`/`worst` are `None` and the scores hold the
/// `f64::INFINITY` / `f64::NEG_INFINITY` sentinels. `cost` is `None` when the
/// scores came from a caller-supplied metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEvaluation {
    pub start: String,
    pub goal: String,
    pub mode: TransportMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<CompositeCost>,
    pub best: Option<ScoredPath>,
    pub worst: Option<ScoredPath>,
    #[serde(serialize_with = "finite_or_null")]
    pub best_score: f64,
    #[serde(serialize_with = "finite_or_null")]
    pub worst_score: f64,
    pub candidates: Vec<ScoredPath>,
    pub best_highlight: BTreeSet<EdgeKey>,
    pub worst_highlight: BTreeSet<EdgeKey>,
}

impl RouteEvaluation {
    /// `true` when no candidate path was found.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn best_label(&self) -> Option<&str> {
        self.best.as_ref().map(|scored| scored.label.as_str())
    }

    pub fn worst_label(&self) -> Option<&str> {
        self.worst.as_ref().map(|scored| scored.label.as_str())
    }
}

/// Score `candidates` with `metric` and pick the extremes.
///
/// `cost` describes `metric` when it is a [`CompositeCost`]. Ties keep the
/// earliest candidate.
pub fn rank_candidates(
    request: &EvaluationRequest,
    cost: Option<CompositeCost>,
    candidates: Vec<RoutePath>,
    metric: &dyn EdgeCost,
) -> RouteEvaluation {
    let scored: Vec<ScoredPath> = candidates
        .into_iter()
        .map(|path| {
            let score = metric.path_score(&path);
            ScoredPath::new(path, score)
        })
        .collect();

    let mut best_score = f64::INFINITY;
    let mut worst_score = f64::NEG_INFINITY;
    let mut best = None;
    let mut worst = None;
    for (position, candidate) in scored.iter().enumerate() {
        if candidate.score < best_score {
            best_score = candidate.score;
            best = Some(position);
        }
        if candidate.score > worst_score {
            worst_score = candidate.score;
            worst = Some(position);
        }
    }

    let best = best.map(|position| scored[position].clone());
    let worst = worst.map(|position| scored[position].clone());
    let best_highlight = best.as_ref().map(ScoredPath::highlight).unwrap_or_default();
    let worst_highlight = worst.as_ref().map(ScoredPath::highlight).unwrap_or_default();

    RouteEvaluation {
        start: request.start.clone(),
        goal: request.goal.clone(),
        mode: request.mode,
        cost,
        best,
        worst,
        best_score,
        worst_score,
        candidates: scored,
        best_highlight,
        worst_highlight,
    }
}

/// Enumerate every simple path for `request` and report the best and worst.
///
/// Walking queries run on an undirected copy of `graph`.
pub fn select_best_and_worst(graph: &RouteGraph, request: &EvaluationRequest) -> RouteEvaluation {
    let cost = request.cost();
    evaluate_with(graph, request, &cost, Some(cost))
}

/// Same as [`select_best_and_worst`] with a caller-supplied route metric.
///
/// The request's criteria are ignored for scoring, so the result carries no
/// `cost` description.
pub fn select_best_and_worst_with(
    graph: &RouteGraph,
    request: &EvaluationRequest,
    metric: &dyn EdgeCost,
) -> RouteEvaluation {
    evaluate_with(graph, request, metric, None)
}

fn evaluate_with(
    graph: &RouteGraph,
    request: &EvaluationRequest,
    metric: &dyn EdgeCost,
    cost: Option<CompositeCost>,
) -> RouteEvaluation {
    let searched = graph_for_mode(graph, request.mode);
    let candidates = find_all_simple_paths_with_limits(
        &searched,
        &request.start,
        &request.goal,
        request.limits,
    );

    let evaluation = rank_candidates(request, cost, candidates, metric);
    debug!(
        start = %request.start,
        goal = %request.goal,
        mode = %request.mode,
        candidates = evaluation.candidates.len(),
        best = evaluation.best_score,
        worst = evaluation.worst_score,
        "evaluated routes"
    );
    evaluation
}

/// Look up `name`, failing with close matches when it is not registered.
pub fn resolve_location<'a>(graph: &'a RouteGraph, name: &str) -> Result<&'a Location> {
    graph.location(name).ok_or_else(|| Error::UnknownLocation {
        name: name.to_string(),
        suggestions: graph.fuzzy_location_matches(name, MAX_SUGGESTIONS),
    })
}

/// Strict variant of [`select_best_and_worst`].
///
/// Fails with [`Error::UnknownLocation`] for unregistered endpoints and
/// [`Error::RouteNotFound`] when no candidate path exists.
pub fn evaluate_route(graph: &RouteGraph, request: &EvaluationRequest) -> Result<RouteEvaluation> {
    resolve_location(graph, &request.start)?;
    resolve_location(graph, &request.goal)?;

    let evaluation = select_best_and_worst(graph, request);
    if evaluation.is_empty() {
        return Err(Error::RouteNotFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        });
    }
    Ok(evaluation)
}
