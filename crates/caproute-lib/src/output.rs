use std::fmt::Write;

use serde::Serialize;

use crate::cost::{RouteOptimization, TraversalParameters};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::PathResult;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// One line per city with leg details and a totals footer.
    PlainText,
    /// Markdown list suitable for chat or issue trackers.
    RichText,
    /// Single arrow-joined line.
    Compact,
}

/// One city along a route together with the leg that led into it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteLeg {
    pub index: usize,
    pub city: String,
    /// Distance of the leg into this city; zero for the origin.
    pub distance: f64,
    /// Toll paid on entering this city; zero for the origin.
    pub toll: f64,
    /// Fuel spent on the leg into this city.
    pub fuel_cost: f64,
    /// Money spent from the origin up to and including this city.
    pub cumulative_cost: f64,
}

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub optimization: RouteOptimization,
    pub hops: usize,
    pub legs: Vec<RouteLeg>,
    pub total_distance: f64,
    pub total_toll: f64,
    pub total_fuel_cost: f64,
    pub total_cost: f64,
}

impl RouteSummary {
    /// Expand a [`PathResult`] into per-leg details.
    pub fn from_result(
        graph: &Graph,
        params: &TraversalParameters,
        optimization: RouteOptimization,
        result: &PathResult,
    ) -> Result<Self> {
        let Some(origin) = result.path.first() else {
            return Err(Error::EmptyRoute);
        };

        let mut legs = Vec::with_capacity(result.path.len());
        legs.push(RouteLeg {
            index: 0,
            city: origin.clone(),
            distance: 0.0,
            toll: 0.0,
            fuel_cost: 0.0,
            cumulative_cost: 0.0,
        });

        let mut cumulative_cost = 0.0;
        for (index, pair) in result.path.windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            let distance = graph.distance(from, to).ok_or_else(|| Error::DanglingNeighbor {
                node: from.clone(),
                neighbor: to.clone(),
            })?;
            let toll = graph.toll(to).ok_or_else(|| Error::UnknownNode {
                name: to.clone(),
                suggestions: graph.fuzzy_matches(to, 3),
            })?;
            let fuel_cost = params.fuel_cost(distance);
            cumulative_cost += fuel_cost + toll;

            legs.push(RouteLeg {
                index: index + 1,
                city: to.clone(),
                distance,
                toll,
                fuel_cost,
                cumulative_cost,
            });
        }

        Ok(Self {
            optimization,
            hops: result.hop_count(),
            legs,
            total_distance: result.total_distance,
            total_toll: result.total_toll,
            total_fuel_cost: result.total_fuel_cost,
            total_cost: result.total_cost,
        })
    }

    pub fn origin(&self) -> &str {
        self.legs.first().map(|leg| leg.city.as_str()).unwrap_or("<unknown>")
    }

    pub fn destination(&self) -> &str {
        self.legs.last().map(|leg| leg.city.as_str()).unwrap_or("<unknown>")
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {} to {} ({} hops; optimizing {}):",
            self.origin(),
            self.destination(),
            self.hops,
            self.optimization
        );
        for leg in &self.legs {
            if leg.index == 0 {
                let _ = writeln!(buffer, "{:>3}: {}", leg.index, leg.city);
            } else {
                let _ = writeln!(
                    buffer,
                    "{:>3}: {} ({} km, toll {:.2}, fuel {:.2})",
                    leg.index, leg.city, leg.distance, leg.toll, leg.fuel_cost
                );
            }
        }
        self.write_totals(&mut buffer);
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, optimizing `{}`)",
            self.origin(),
            self.destination(),
            self.hops,
            self.optimization
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** ({} km, {:.2} so far)",
                leg.index, leg.city, leg.distance, leg.cumulative_cost
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let joined = self
            .legs
            .iter()
            .map(|leg| leg.city.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        format!("{joined} ({:.2})\n", self.total_cost)
    }

    fn write_totals(&self, buffer: &mut String) {
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Total distance: {} km", self.total_distance);
        let _ = writeln!(buffer, "Total toll: {:.2}", self.total_toll);
        let _ = writeln!(buffer, "Fuel cost: {:.2}", self.total_fuel_cost);
        let _ = writeln!(buffer, "Total trip cost: {:.2}", self.total_cost);
    }
}
