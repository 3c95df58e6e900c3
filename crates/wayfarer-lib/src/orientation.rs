use tracing::debug;

use crate::graph::RouteGraph;

/// Build an independent undirected copy of `graph`.
///
/// Every location is carried over. Each route appears twice in the result:
/// the source route followed immediately by its reverse with identical costs.
/// The source graph is left untouched.
pub fn to_undirected(graph: &RouteGraph) -> RouteGraph {
    let mut undirected = RouteGraph::with_orientation(false);
    for location in graph.locations() {
        undirected.add_location(location.name());
    }

    for route in graph.routes() {
        let reverse = route.reversed();
        // Endpoints come from the source registry, which was copied above.
        if let Err(error) = undirected
            .add_route(route.clone())
            .and_then(|()| undirected.add_route(reverse))
        {
            debug!(%error, "skipping route with unregistered endpoint");
        }
    }

    debug!(
        locations = undirected.location_count(),
        routes = undirected.route_count(),
        "built undirected route graph"
    );
    undirected
}
