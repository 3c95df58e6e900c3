//! Wayfarer library entry points.
//!
//! This crate loads a catalog of directed, multi-cost routes between named
//! locations, annotates them with traffic windows, enumerates every simple
//! path between two locations and scores those paths to report the best and
//! worst alternatives. Higher-level consumers (the CLI) should only depend on
//! the functions exported here instead of reimplementing behavior.
//!

pub mod config;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod orientation;
pub mod path;
pub mod routing;
pub mod traffic;

pub use config::{default_data_dir, resolve_data_paths, DataPaths};
pub use error::{Error, Result};
pub use graph::{Location, Route, RouteCosts, RouteGraph};
pub use ingest::{
    build_graph, load_routes, load_routes_from_path, load_traffic, load_traffic_from_path,
    parse_route_line, parse_traffic_line, IngestReport, RejectedRecord, RouteRecord,
    TrafficRecord,
};
pub use orientation::to_undirected;
pub use path::{
    find_all_simple_paths, find_all_simple_paths_with_limits, RoutePath, SearchLimits,
    SimplePaths,
};
pub use routing::{
    evaluate_route, graph_for_mode, path_label, resolve_location, select_best_and_worst,
    select_best_and_worst_with, CompositeCost, Criterion, EdgeCost, EdgeKey, EvaluationRequest,
    RouteEvaluation, ScoredPath, TransportMode,
};
pub use traffic::{apply_traffic_records, TrafficWindow};
