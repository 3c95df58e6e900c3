//! Per-route cost functions used to score candidate paths.
//!
//! The [`EdgeCost`] trait is the seam between the evaluator and the metric:
//! [`CompositeCost`] is the query-time configurable implementation, and
//! callers may supply their own.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::graph::Route;
use crate::path::RoutePath;

use super::TransportMode;

/// Cost dimension a query may score paths by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Gas consumption.
    Fuel,
    PhysicalWear,
    Distance,
}

impl Criterion {
    /// Raw value of this dimension on `route`.
    pub fn value(self, route: &Route) -> u32 {
        let costs = route.costs();
        match self {
            Criterion::Fuel => costs.fuel_cost,
            Criterion::PhysicalWear => costs.physical_wear,
            Criterion::Distance => costs.distance,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Criterion::Fuel => "fuel",
            Criterion::PhysicalWear => "physical_wear",
            Criterion::Distance => "distance",
        };
        f.write_str(value)
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fuel" | "gas" | "gas_consumption" => Ok(Criterion::Fuel),
            "physical_wear" | "wear" => Ok(Criterion::PhysicalWear),
            "distance" => Ok(Criterion::Distance),
            _ => Err(Error::UnknownCriterion {
                name: s.to_string(),
            }),
        }
    }
}

/// Metric assigned to each route of a candidate path.
pub trait EdgeCost {
    fn edge_metric(&self, route: &Route) -> f64;

    /// Path score: the sum of its route metrics.
    fn path_score(&self, path: &RoutePath) -> f64 {
        path.total_by(|route| self.edge_metric(route))
    }
}

/// One or two criteria combined according to the transport mode.
///
/// - vehicle, both criteria non-zero on the route: their sum
/// - walking: the secondary criterion when one was requested, otherwise the primary
/// - anything else: the primary criterion alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositeCost {
    pub mode: TransportMode,
    pub primary: Criterion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<Criterion>,
}

impl CompositeCost {
    pub fn new(mode: TransportMode, primary: Criterion, secondary: Option<Criterion>) -> Self {
        Self {
            mode,
            primary,
            secondary,
        }
    }
}

impl EdgeCost for CompositeCost {
    fn edge_metric(&self, route: &Route) -> f64 {
        let primary = self.primary.value(route);
        let secondary = self.secondary.map(|criterion| criterion.value(route));

        match (self.mode, secondary) {
            (TransportMode::Vehicle, Some(second)) if primary != 0 && second != 0 => {
                f64::from(primary) + f64::from(second)
            }
            (TransportMode::Walking, Some(second)) => f64::from(second),
            _ => f64::from(primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Location, RouteCosts};

    fn route(fuel_cost: u32, physical_wear: u32, distance: u32) -> Route {
        Route::new(
            Location::new("A"),
            Location::new("B"),
            RouteCosts {
                fuel_cost,
                physical_wear,
                distance,
                ..RouteCosts::default()
            },
        )
    }

    #[test]
    fn vehicle_sums_nonzero_criteria() {
        let cost = CompositeCost::new(
            TransportMode::Vehicle,
            Criterion::Fuel,
            Some(Criterion::Distance),
        );
        assert_eq!(cost.edge_metric(&route(4, 0, 6)), 10.0);
    }

    #[test]
    fn vehicle_with_zero_secondary_keeps_primary() {
        let cost = CompositeCost::new(
            TransportMode::Vehicle,
            Criterion::Fuel,
            Some(Criterion::PhysicalWear),
        );
        assert_eq!(cost.edge_metric(&route(4, 0, 6)), 4.0);
    }

    #[test]
    fn walking_prefers_secondary() {
        let cost = CompositeCost::new(
            TransportMode::Walking,
            Criterion::Distance,
            Some(Criterion::PhysicalWear),
        );
        assert_eq!(cost.edge_metric(&route(4, 2, 6)), 2.0);

        let single = CompositeCost::new(TransportMode::Walking, Criterion::Distance, None);
        assert_eq!(single.edge_metric(&route(4, 2, 6)), 6.0);
    }

    #[test]
    fn criterion_parses_aliases() {
        assert_eq!("gas".parse::<Criterion>().unwrap(), Criterion::Fuel);
        assert_eq!(
            "Physical-Wear".parse::<Criterion>().unwrap(),
            Criterion::PhysicalWear
        );
        assert!("speed".parse::<Criterion>().is_err());
    }
}
