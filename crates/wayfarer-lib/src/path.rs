use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::graph::{Route, RouteGraph};

/// Caps applied while enumerating simple paths.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of routes in any emitted path.
    pub max_depth: Option<usize>,
    /// Stop after emitting this many paths.
    pub max_paths: Option<usize>,
}

impl SearchLimits {
    fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |limit| depth <= limit)
    }

    fn exhausted(&self, emitted: usize) -> bool {
        self.max_paths.is_some_and(|limit| emitted >= limit)
    }
}

/// Ordered sequence of routes where each destination is the next origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoutePath {
    routes: Vec<Route>,
}

impl RoutePath {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (hops) in the path.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Location names visited, starting with the first origin.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes = Vec::with_capacity(self.routes.len() + 1);
        if let Some(first) = self.routes.first() {
            nodes.push(first.origin().name());
        }
        nodes.extend(self.routes.iter().map(|route| route.destination().name()));
        nodes
    }

    /// `true` when every route starts where the previous one ended.
    pub fn is_connected(&self) -> bool {
        self.routes
            .windows(2)
            .all(|pair| pair[0].destination() == pair[1].origin())
    }

    /// `true` when the path is connected and repeats no location.
    pub fn is_simple(&self) -> bool {
        let nodes = self.nodes();
        let unique: HashSet<&str> = nodes.iter().copied().collect();
        self.is_connected() && unique.len() == nodes.len()
    }

    /// Sum of `metric` over every route.
    pub fn total_by<F>(&self, metric: F) -> f64
    where
        F: Fn(&Route) -> f64,
    {
        self.routes.iter().map(metric).sum()
    }
}

struct Frame<'a> {
    location: &'a str,
    cursor: usize,
}

/// Lazy depth-first enumeration of every simple path between two locations.
///
/// Paths are produced in the order a recursive search over each location's
/// routes (insertion order) would find them. The iterator is finite; call
/// [`SimplePaths::restart`] or clone a fresh one to walk the sequence again.
pub struct SimplePaths<'a> {
    graph: &'a RouteGraph,
    start: &'a str,
    goal: &'a str,
    limits: SearchLimits,
    stack: Vec<Frame<'a>>,
    visited: HashSet<&'a str>,
    trail: Vec<usize>,
    emitted: usize,
}

impl<'a> SimplePaths<'a> {
    pub fn new(graph: &'a RouteGraph, start: &'a str, goal: &'a str) -> Self {
        Self::with_limits(graph, start, goal, SearchLimits::default())
    }

    pub fn with_limits(
        graph: &'a RouteGraph,
        start: &'a str,
        goal: &'a str,
        limits: SearchLimits,
    ) -> Self {
        let mut paths = Self {
            graph,
            start,
            goal,
            limits,
            stack: Vec::new(),
            visited: HashSet::new(),
            trail: Vec::new(),
            emitted: 0,
        };
        paths.restart();
        paths
    }

    /// Rewind to the first path.
    pub fn restart(&mut self) {
        self.stack.clear();
        self.visited.clear();
        self.trail.clear();
        self.emitted = 0;

        if !self.graph.contains(self.start) || !self.graph.contains(self.goal) {
            return;
        }

        self.visited.insert(self.start);
        self.stack.push(Frame {
            location: self.start,
            cursor: 0,
        });
    }

    fn materialize(&self, last: usize) -> RoutePath {
        let routes = self
            .trail
            .iter()
            .chain(std::iter::once(&last))
            .map(|&position| self.graph.route_at(position).clone())
            .collect();
        RoutePath::new(routes)
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = RoutePath;

    fn next(&mut self) -> Option<RoutePath> {
        if self.limits.exhausted(self.emitted) {
            return None;
        }

        let graph = self.graph;
        loop {
            let frame = self.stack.last_mut()?;
            let outgoing = graph.outgoing_indices(frame.location);

            let Some(&position) = outgoing.get(frame.cursor) else {
                let finished = self.stack.pop()?;
                self.visited.remove(finished.location);
                if !self.stack.is_empty() {
                    self.trail.pop();
                }
                continue;
            };
            frame.cursor += 1;

            let next = graph.route_at(position).destination().name();
            if self.visited.contains(next) {
                continue;
            }

            let depth = self.trail.len() + 1;
            if !self.limits.allows_depth(depth) {
                continue;
            }

            if next == self.goal {
                self.emitted += 1;
                return Some(self.materialize(position));
            }

            if !self.limits.allows_depth(depth + 1) {
                continue;
            }

            self.trail.push(position);
            self.visited.insert(next);
            self.stack.push(Frame {
                location: next,
                cursor: 0,
            });
        }
    }
}

impl Clone for SimplePaths<'_> {
    /// A clone starts again from the first path.
    fn clone(&self) -> Self {
        Self::with_limits(self.graph, self.start, self.goal, self.limits)
    }
}

/// Enumerate every simple path from `start` to `goal`.
///
/// Unknown locations and disconnected pairs both yield an empty list.
pub fn find_all_simple_paths(graph: &RouteGraph, start: &str, goal: &str) -> Vec<RoutePath> {
    find_all_simple_paths_with_limits(graph, start, goal, SearchLimits::default())
}

/// Enumerate simple paths subject to `limits`.
pub fn find_all_simple_paths_with_limits(
    graph: &RouteGraph,
    start: &str,
    goal: &str,
    limits: SearchLimits,
) -> Vec<RoutePath> {
    let paths: Vec<RoutePath> = SimplePaths::with_limits(graph, start, goal, limits).collect();
    debug!(
        start,
        goal,
        candidates = paths.len(),
        "enumerated simple paths"
    );
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Location, RouteCosts};

    fn chain(names: &[&str]) -> RouteGraph {
        let mut graph = RouteGraph::new();
        for name in names {
            graph.add_location(name);
        }
        for pair in names.windows(2) {
            graph
                .add_route(Route::new(
                    Location::new(pair[0]),
                    Location::new(pair[1]),
                    RouteCosts::default(),
                ))
                .unwrap();
        }
        graph
    }

    #[test]
    fn depth_limit_prunes_long_paths() {
        let graph = chain(&["A", "B", "C", "D"]);
        let limits = SearchLimits {
            max_depth: Some(2),
            max_paths: None,
        };
        assert!(find_all_simple_paths_with_limits(&graph, "A", "D", limits).is_empty());
        assert_eq!(
            find_all_simple_paths_with_limits(&graph, "A", "C", limits).len(),
            1
        );
    }

    #[test]
    fn restart_replays_sequence() {
        let graph = chain(&["A", "B", "C"]);
        let mut paths = SimplePaths::new(&graph, "A", "C");
        let first: Vec<_> = paths.by_ref().collect();
        assert!(paths.next().is_none());

        paths.restart();
        let second: Vec<_> = paths.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_path_has_no_nodes() {
        let path = RoutePath::new(Vec::new());
        assert!(path.nodes().is_empty());
        assert!(path.is_simple());
    }
}
