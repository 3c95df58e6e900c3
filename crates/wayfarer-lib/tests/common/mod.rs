#![allow(dead_code)]

use std::path::PathBuf;

use wayfarer_lib::{load_routes_from_path, Location, Route, RouteCosts, RouteGraph};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Graph loaded from `docs/fixtures/routes.txt`.
pub fn fixture_graph() -> RouteGraph {
    let mut graph = RouteGraph::new();
    let report = load_routes_from_path(&mut graph, &fixtures_dir().join("routes.txt"))
        .expect("fixture routes load");
    assert!(report.rejected.is_empty(), "fixture routes are well formed");
    graph
}

pub fn distance_route(origin: &str, destination: &str, distance: u32) -> Route {
    Route::new(
        Location::new(origin),
        Location::new(destination),
        RouteCosts {
            distance,
            ..RouteCosts::default()
        },
    )
}

/// Directed graph built from `(origin, destination, distance)` triples.
pub fn graph_from(edges: &[(&str, &str, u32)]) -> RouteGraph {
    let mut graph = RouteGraph::new();
    for &(origin, destination, distance) in edges {
        graph.add_location(origin);
        graph.add_location(destination);
        graph
            .add_route(distance_route(origin, destination, distance))
            .expect("endpoints registered");
    }
    graph
}
