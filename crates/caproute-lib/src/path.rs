use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::cost::{CostModel, HopCost};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::trace::TraceRecorder;

/// Outcome of a single path search.
///
/// An unreachable destination is a normal result: `path` is empty and every
/// total is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub path: Vec<String>,
    pub total_distance: f64,
    pub total_toll: f64,
    pub total_fuel_cost: f64,
    pub total_cost: f64,
}

impl PathResult {
    /// Result for a destination that cannot be reached.
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            total_distance: 0.0,
            total_toll: 0.0,
            total_fuel_cost: 0.0,
            total_cost: 0.0,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Running totals for one city while a search is in progress.
#[derive(Debug, Clone, Copy)]
struct Totals<'g> {
    weight: f64,
    cost: f64,
    distance: f64,
    toll: f64,
    fuel_cost: f64,
    previous: Option<&'g str>,
}

impl<'g> Totals<'g> {
    const UNREACHED: Self = Self {
        weight: f64::INFINITY,
        cost: f64::INFINITY,
        distance: f64::INFINITY,
        toll: f64::INFINITY,
        fuel_cost: f64::INFINITY,
        previous: None,
    };

    const ORIGIN: Self = Self {
        weight: 0.0,
        cost: 0.0,
        distance: 0.0,
        toll: 0.0,
        fuel_cost: 0.0,
        previous: None,
    };

    fn extend(&self, hop: &HopCost, via: &'g str) -> Self {
        Self {
            weight: self.weight + hop.weight,
            cost: self.cost + hop.trip_cost(),
            distance: self.distance + hop.distance,
            toll: self.toll + hop.toll,
            fuel_cost: self.fuel_cost + hop.fuel_cost,
            previous: Some(via),
        }
    }

    fn summary(&self) -> String {
        format!(
            "Cost: {:.2} | Distance: {} km | Toll: {:.2} | Fuel: {:.2}",
            self.cost, self.distance, self.toll, self.fuel_cost
        )
    }
}

/// State owned by one in-progress search and dropped when it returns.
struct SearchState<'g> {
    totals: HashMap<&'g str, Totals<'g>>,
    settled: HashSet<&'g str>,
}

impl<'g> SearchState<'g> {
    fn new(graph: &'g Graph, start: &'g str) -> Self {
        let mut totals: HashMap<&'g str, Totals<'g>> = graph
            .nodes()
            .map(|node| (node, Totals::UNREACHED))
            .collect();
        totals.insert(start, Totals::ORIGIN);

        Self {
            totals,
            settled: HashSet::with_capacity(graph.len()),
        }
    }

    fn get(&self, node: &str) -> Totals<'g> {
        self.totals.get(node).copied().unwrap_or(Totals::UNREACHED)
    }

    fn reconstruct_path(&self, start: &str, goal: &'g str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(goal);
        while let Some(node) = current {
            path.push(node.to_string());
            if node == start {
                break;
            }
            current = self.get(node).previous;
        }
        path.reverse();
        path
    }
}

/// Find the route from `start` to `goal` that minimises the weight reported
/// by `model`, recording every decision into `trace`.
///
/// Fails with [`Error::UnknownNode`] when either endpoint is not a city of
/// `graph`, and with [`Error::CostOverflow`] when a hop cost is not finite.
/// Equal-weight candidates are resolved in favour of the lexicographically
/// smaller city name, and a city's predecessor only changes on a strict
/// improvement.
pub fn find_cheapest_path(
    graph: &Graph,
    start: &str,
    goal: &str,
    model: &dyn CostModel,
    trace: &mut TraceRecorder,
) -> Result<PathResult> {
    let start = graph.resolve(start)?;
    let goal = graph.resolve(goal)?;

    trace.info(format!(
        "Starting {} search from \"{}\" to \"{}\"",
        model.optimization(),
        start,
        goal
    ));
    for line in model.describe() {
        trace.info(line);
    }
    trace.step("Starting Dijkstra's algorithm");

    let mut state = SearchState::new(graph, start);
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry::new(start, 0.0));

    let mut reached = false;
    while let Some(entry) = queue.pop() {
        if state.settled.contains(entry.node) {
            continue;
        }
        let current = state.get(entry.node);
        if entry.weight.0 > current.weight {
            continue;
        }

        trace.highlight(format!("Analyzing: {}", entry.node));
        trace.info(current.summary());

        if entry.node == goal {
            trace.success(format!("Destination \"{}\" reached!", goal));
            reached = true;
            break;
        }

        state.settled.insert(entry.node);
        let mut explored = 0usize;

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            let Some(toll) = graph.toll(next) else {
                continue;
            };
            if state.settled.contains(next) {
                continue;
            }
            explored += 1;

            let hop = model.hop(edge.distance, toll);
            let candidate = current.extend(&hop, entry.node);
            if !candidate.weight.is_finite() || !candidate.cost.is_finite() {
                trace.error(format!(
                    "Cost overflow while exploring {} from {}",
                    next, entry.node
                ));
                return Err(Error::CostOverflow {
                    from: entry.node.to_string(),
                    to: next.to_string(),
                });
            }
            if candidate.weight < state.get(next).weight {
                state.totals.insert(next, candidate);
                queue.push(QueueEntry::new(next, candidate.weight));

                trace.step(format!("Exploring: {}", next));
                trace.info(format!("New {}", candidate.summary().to_lowercase()));
            }
        }

        if explored == 0 {
            trace.warning(format!(
                "No unsettled neighbours left from {}, backtracking",
                entry.node
            ));
        }
    }

    if !reached {
        trace.error("No path found: every remaining city is unreachable.");
        trace.error(format!("No possible path from \"{}\" to \"{}\".", start, goal));
        debug!(start, goal, settled = state.settled.len(), "destination unreachable");
        return Ok(PathResult::unreachable());
    }

    let path = state.reconstruct_path(start, goal);
    let totals = state.get(goal);

    trace.success(format!("Best route found: {}", path.join(" → ")));
    trace.info(format!("Total distance: {} km", totals.distance));
    trace.info(format!("Total toll: {:.2}", totals.toll));
    trace.info(format!("Fuel cost: {:.2}", totals.fuel_cost));
    trace.highlight(format!("Total trip cost: {:.2}", totals.cost));

    debug!(
        start,
        goal,
        hops = path.len().saturating_sub(1),
        settled = state.settled.len(),
        "route found"
    );

    Ok(PathResult {
        path,
        total_distance: totals.distance,
        total_toll: totals.toll,
        total_fuel_cost: totals.fuel_cost,
        total_cost: totals.cost,
    })
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'g> {
    node: &'g str,
    weight: FloatOrd,
}

impl<'g> QueueEntry<'g> {
    fn new(node: &'g str, weight: f64) -> Self {
        Self {
            node,
            weight: FloatOrd(weight),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by weight, then name.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
