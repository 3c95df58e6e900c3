use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traffic::TrafficWindow;

/// Minimum Jaro-Winkler similarity for a location to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Named node within the route graph. Identity is the exact, case-sensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    name: String,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Independent cost dimensions carried by every route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouteCosts {
    pub vehicle_time: u32,
    pub walking_time: u32,
    pub fuel_cost: u32,
    pub physical_wear: u32,
    pub distance: u32,
}

/// Directed, weighted edge from `origin` to `destination`.
///
/// Endpoints and costs are fixed at construction; only the traffic windows
/// grow afterwards, and only through [`RouteGraph::add_traffic_window`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    origin: Location,
    destination: Location,
    #[serde(flatten)]
    costs: RouteCosts,
    traffic_windows: Vec<TrafficWindow>,
}

impl Route {
    pub fn new(origin: Location, destination: Location, costs: RouteCosts) -> Self {
        Self {
            origin,
            destination,
            costs,
            traffic_windows: Vec::new(),
        }
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    pub fn costs(&self) -> &RouteCosts {
        &self.costs
    }

    pub fn traffic_windows(&self) -> &[TrafficWindow] {
        &self.traffic_windows
    }

    /// Synthetic route travelling the opposite way with identical costs.
    ///
    /// Traffic windows are directional and are not carried over.
    pub fn reversed(&self) -> Self {
        Self::new(
            self.destination.clone(),
            self.origin.clone(),
            self.costs,
        )
    }

    pub(crate) fn push_traffic_window(&mut self, window: TrafficWindow) {
        self.traffic_windows.push(window);
    }
}

/// Owner of the location registry and the route catalog.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    locations: Vec<Location>,
    index: HashMap<String, usize>,
    routes: Vec<Route>,
    outgoing: HashMap<String, Vec<usize>>,
    adjacency: HashMap<String, Vec<String>>,
    directed: bool,
}

impl Default for RouteGraph {
    fn default() -> Self {
        Self::with_orientation(true)
    }
}

impl RouteGraph {
    /// Create an empty directed graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_orientation(directed: bool) -> Self {
        Self {
            locations: Vec::new(),
            index: HashMap::new(),
            routes: Vec::new(),
            outgoing: HashMap::new(),
            adjacency: HashMap::new(),
            directed,
        }
    }

    /// `false` for graphs produced by [`crate::orientation::to_undirected`].
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Locations in registration order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Routes in insertion order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.index.get(name).map(|&idx| &self.locations[idx])
    }

    /// Register a location. Returns `false` when the name was already present.
    pub fn add_location(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.locations.len());
        self.locations.push(Location::new(name));
        self.adjacency.entry(name.to_string()).or_default();
        self.outgoing.entry(name.to_string()).or_default();
        true
    }

    /// Append a route. Parallel routes between the same pair are kept.
    ///
    /// Both endpoints must already be registered.
    pub fn add_route(&mut self, route: Route) -> Result<()> {
        for endpoint in [route.origin.name(), route.destination.name()] {
            if !self.contains(endpoint) {
                return Err(Error::UnregisteredEndpoint {
                    origin: route.origin.name().to_string(),
                    destination: route.destination.name().to_string(),
                    missing: endpoint.to_string(),
                });
            }
        }

        let origin = route.origin.name().to_string();
        let destination = route.destination.name().to_string();
        let position = self.routes.len();
        self.routes.push(route);

        self.outgoing
            .entry(origin.clone())
            .or_default()
            .push(position);
        self.adjacency
            .entry(origin.clone())
            .or_default()
            .push(destination.clone());
        self.adjacency.entry(destination).or_default().push(origin);
        Ok(())
    }

    /// Neighbour names recorded in both directions, one entry per route.
    pub fn neighbours(&self, name: &str) -> &[String] {
        self.adjacency
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Routes leaving `name`, in insertion order.
    pub fn routes_from<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Route> + 'a {
        self.outgoing_indices(name)
            .iter()
            .map(move |&idx| &self.routes[idx])
    }

    pub(crate) fn outgoing_indices(&self, name: &str) -> &[usize] {
        self.outgoing
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn route_at(&self, position: usize) -> &Route {
        &self.routes[position]
    }

    pub(crate) fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Drop every location and route, keeping the orientation flag.
    pub fn reset(&mut self) {
        debug!(
            locations = self.locations.len(),
            routes = self.routes.len(),
            "resetting route graph"
        );
        self.locations.clear();
        self.index.clear();
        self.routes.clear();
        self.outgoing.clear();
        self.adjacency.clear();
    }

    /// Location names similar to `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .iter()
            .map(|location| {
                let score = strsim::jaro_winkler(&needle, &location.name.to_lowercase());
                (score, location.name.as_str())
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
