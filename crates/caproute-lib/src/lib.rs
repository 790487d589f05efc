//! caproute library entry points.
//!
//! This crate loads the capital-city road graph, validates route queries and
//! runs the cheapest-route search. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!
//! ```
//! use caproute_lib::{bundled_graph, run_query, RouteQuery};
//!
//! let graph = bundled_graph()?;
//! let outcome = run_query(&graph, &RouteQuery::new("Recife", "Salvador"));
//! assert!(outcome.is_success());
//! # Ok::<(), caproute_lib::Error>(())
//! ```

#![deny(warnings)]

pub mod cost;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod query;
pub mod trace;
pub mod validate;

pub use cost::{
    fuel_cost, select_cost_model, CheapestTrip, CostModel, HopCost, RouteOptimization,
    ShortestDistance, TraversalParameters, DEFAULT_FUEL_EFFICIENCY, DEFAULT_FUEL_PRICE,
};
pub use dataset::{bundled_graph, ensure_graph, load_graph, resolve_dataset_source, DatasetSource};
pub use error::{Error, Result};
pub use graph::{CityData, CityTable, Edge, Graph};
pub use output::{RouteLeg, RouteRenderMode, RouteSummary};
pub use path::{find_cheapest_path, PathResult};
pub use query::{run_query, run_query_in, QueryContext, QueryOutcome, RouteQuery};
pub use trace::{LogEntry, LogKind, TraceRecorder};
pub use validate::{validate_endpoints, validate_inputs, InputField, ValidationError};
