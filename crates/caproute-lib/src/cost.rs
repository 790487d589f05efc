//! Cost models used by the path finder.
//!
//! The search engine never computes a cost itself. It asks a [`CostModel`] for
//! the contribution of every hop and minimises the returned weight, so the
//! cheapest-trip and shortest-distance searches share one engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fuel price used when the caller does not provide one (currency per liter).
pub const DEFAULT_FUEL_PRICE: f64 = 5.0;

/// Vehicle efficiency used when the caller does not provide one (km per liter).
pub const DEFAULT_FUEL_EFFICIENCY: f64 = 10.0;

/// Vehicle and market parameters for a single query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraversalParameters {
    /// Price of one liter of fuel.
    pub fuel_price: f64,
    /// Kilometres driven per liter of fuel.
    pub fuel_efficiency: f64,
}

impl Default for TraversalParameters {
    fn default() -> Self {
        Self {
            fuel_price: DEFAULT_FUEL_PRICE,
            fuel_efficiency: DEFAULT_FUEL_EFFICIENCY,
        }
    }
}

impl TraversalParameters {
    pub fn new(fuel_price: f64, fuel_efficiency: f64) -> Self {
        Self {
            fuel_price,
            fuel_efficiency,
        }
    }

    /// Fuel cost of driving `distance` kilometres with these parameters.
    pub fn fuel_cost(&self, distance: f64) -> f64 {
        fuel_cost(distance, self.fuel_price, self.fuel_efficiency)
    }
}

/// Fuel cost of a leg: liters burned times the price per liter.
///
/// ```
/// use caproute_lib::cost::fuel_cost;
///
/// assert_eq!(fuel_cost(10.0, 5.0, 10.0), 5.0);
/// assert_eq!(fuel_cost(0.0, 5.0, 10.0), 0.0);
/// ```
pub fn fuel_cost(distance: f64, fuel_price: f64, fuel_efficiency: f64) -> f64 {
    (distance / fuel_efficiency) * fuel_price
}

/// Optimization objective for route planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteOptimization {
    /// Minimise fuel cost plus tolls.
    #[default]
    Cost,
    /// Minimise driven distance, ignoring tolls.
    Distance,
}

impl fmt::Display for RouteOptimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteOptimization::Cost => "cost",
            RouteOptimization::Distance => "distance",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteOptimization {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "cost" | "cheapest" => Ok(RouteOptimization::Cost),
            "distance" | "shortest" => Ok(RouteOptimization::Distance),
            other => Err(format!("unknown optimization objective: {other}")),
        }
    }
}

/// Contribution of a single hop into a neighbouring city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopCost {
    /// Road distance of the hop.
    pub distance: f64,
    /// Fuel spent on the hop.
    pub fuel_cost: f64,
    /// Toll charged on entering the neighbour.
    pub toll: f64,
    /// Value the search minimises.
    pub weight: f64,
}

impl HopCost {
    /// Money spent on the hop, regardless of what the search minimises.
    pub fn trip_cost(&self) -> f64 {
        self.fuel_cost + self.toll
    }
}

/// Strategy deciding how much a hop costs.
///
/// Implementations must return a non-negative `weight` for non-negative
/// inputs, otherwise the settled-node invariant of the search breaks.
pub trait CostModel: Send + Sync {
    /// Objective implemented by this model.
    fn optimization(&self) -> RouteOptimization;

    /// Cost of driving `distance` kilometres into a city charging `toll`.
    fn hop(&self, distance: f64, toll: f64) -> HopCost;

    /// Human-readable lines describing the model parameters, recorded at the
    /// top of the search trace.
    fn describe(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Minimises fuel cost plus the tolls of every entered city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheapestTrip {
    params: TraversalParameters,
}

impl CheapestTrip {
    pub fn new(params: TraversalParameters) -> Self {
        Self { params }
    }
}

impl CostModel for CheapestTrip {
    fn optimization(&self) -> RouteOptimization {
        RouteOptimization::Cost
    }

    fn hop(&self, distance: f64, toll: f64) -> HopCost {
        let fuel_cost = self.params.fuel_cost(distance);
        HopCost {
            distance,
            fuel_cost,
            toll,
            weight: fuel_cost + toll,
        }
    }

    fn describe(&self) -> Vec<String> {
        vec![
            format!("Fuel price: {:.2}/L", self.params.fuel_price),
            format!("Fuel efficiency: {:.2} km/L", self.params.fuel_efficiency),
        ]
    }
}

/// Minimises driven distance.
///
/// Fuel and tolls are still reported for the chosen route, but they never
/// influence which route is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortestDistance {
    params: TraversalParameters,
}

impl ShortestDistance {
    pub fn new(params: TraversalParameters) -> Self {
        Self { params }
    }
}

impl CostModel for ShortestDistance {
    fn optimization(&self) -> RouteOptimization {
        RouteOptimization::Distance
    }

    fn hop(&self, distance: f64, toll: f64) -> HopCost {
        HopCost {
            distance,
            fuel_cost: self.params.fuel_cost(distance),
            toll,
            weight: distance,
        }
    }

    fn describe(&self) -> Vec<String> {
        vec!["Optimizing for distance; tolls do not affect the route".to_string()]
    }
}

/// Select the cost model for an objective.
pub fn select_cost_model(
    optimization: RouteOptimization,
    params: TraversalParameters,
) -> Box<dyn CostModel> {
    match optimization {
        RouteOptimization::Cost => Box::new(CheapestTrip::new(params)),
        RouteOptimization::Distance => Box::new(ShortestDistance::new(params)),
    }
}
