//! Time-windowed congestion annotations attached to existing routes.

use serde::Serialize;
use tracing::warn;

use crate::graph::RouteGraph;
use crate::ingest::TrafficRecord;

/// Congestion probability observed between `start_time` and `end_time`.
///
/// Windows are only ever appended; overlapping windows on the same route are
/// kept side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficWindow {
    pub start_time: u32,
    pub end_time: u32,
    pub congestion_probability: u32,
}

impl RouteGraph {
    /// Append `window` to the first route running `origin -> destination`.
    ///
    /// Parallel routes sharing the pair are not annotated. Returns `false`
    /// when no such route exists.
    pub fn add_traffic_window(
        &mut self,
        origin: &str,
        destination: &str,
        window: TrafficWindow,
    ) -> bool {
        let matching = self.routes_mut().iter_mut().find(|route| {
            route.origin().name() == origin && route.destination().name() == destination
        });

        match matching {
            Some(route) => {
                route.push_traffic_window(window);
                true
            }
            None => false,
        }
    }
}

/// Apply parsed traffic records, returning how many found a route.
pub fn apply_traffic_records<'a, I>(graph: &mut RouteGraph, records: I) -> usize
where
    I: IntoIterator<Item = &'a TrafficRecord>,
{
    let mut applied = 0;
    for record in records {
        if graph.add_traffic_window(&record.origin, &record.destination, record.window) {
            applied += 1;
        } else {
            warn!(
                origin = %record.origin,
                destination = %record.destination,
                "traffic record matches no route; skipping"
            );
        }
    }
    applied
}
