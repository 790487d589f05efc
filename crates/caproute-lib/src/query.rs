//! Query facade: the single entry point for route queries.
//!
//! A query runs through these stages:
//! 1. Reset the [`QueryContext`] (result, trace, errors)
//! 2. Validate the raw inputs, returning early on any violation
//! 3. Reject identical origin and destination
//! 4. Check both endpoints exist in the graph
//! 5. Run the path finder with the selected cost model
//!
//! All per-query state lives in the context, so a shared [`Graph`] can serve
//! any number of queries without state leaking between them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::{select_cost_model, RouteOptimization, TraversalParameters};
use crate::error::Error;
use crate::graph::Graph;
use crate::path::{find_cheapest_path, PathResult};
use crate::trace::{LogEntry, TraceRecorder};
use crate::validate::{validate_endpoints, validate_inputs, InputField, ValidationError};

/// High-level route query as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RouteQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub parameters: TraversalParameters,
    #[serde(default)]
    pub optimization: RouteOptimization,
}

impl RouteQuery {
    /// Cheapest-trip query with default traversal parameters.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            parameters: TraversalParameters::default(),
            optimization: RouteOptimization::Cost,
        }
    }

    pub fn with_parameters(mut self, parameters: TraversalParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_optimization(mut self, optimization: RouteOptimization) -> Self {
        self.optimization = optimization;
        self
    }
}

/// Everything a query produced, handed back to the caller as data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    /// Search result; `None` when validation stopped the query.
    pub result: Option<PathResult>,
    pub validation_errors: Vec<ValidationError>,
    /// Explanation of why no route exists, when the search found none.
    pub route_error: Option<String>,
    pub trace: Vec<LogEntry>,
}

impl QueryOutcome {
    /// Whether the query produced a reachable route.
    pub fn is_success(&self) -> bool {
        self.result
            .as_ref()
            .map(PathResult::is_reachable)
            .unwrap_or(false)
    }
}

/// Mutable state of one query.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    result: Option<PathResult>,
    validation_errors: Vec<ValidationError>,
    route_error: Option<String>,
    trace: TraceRecorder,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded by a previous query.
    pub fn reset(&mut self) {
        self.result = None;
        self.validation_errors.clear();
        self.route_error = None;
        self.trace.clear();
    }

    pub fn result(&self) -> Option<&PathResult> {
        self.result.as_ref()
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    pub fn route_error(&self) -> Option<&str> {
        self.route_error.as_deref()
    }

    pub fn trace(&self) -> &TraceRecorder {
        &self.trace
    }

    pub fn into_outcome(self) -> QueryOutcome {
        QueryOutcome {
            result: self.result,
            validation_errors: self.validation_errors,
            route_error: self.route_error,
            trace: self.trace.into_entries(),
        }
    }
}

/// Run a query in a fresh context.
pub fn run_query(graph: &Graph, query: &RouteQuery) -> QueryOutcome {
    let mut context = QueryContext::new();
    run_query_in(graph, query, &mut context);
    context.into_outcome()
}

/// Run a query, recording everything into `context`.
///
/// The context is reset first. Returns the search result when the query got
/// past validation.
pub fn run_query_in<'c>(
    graph: &Graph,
    query: &RouteQuery,
    context: &'c mut QueryContext,
) -> Option<&'c PathResult> {
    context.reset();

    let start = query.start.as_deref();
    let end = query.end.as_deref();

    context.validation_errors = validate_inputs(start, end, &query.parameters);
    if !context.validation_errors.is_empty() {
        debug!(
            errors = context.validation_errors.len(),
            "query rejected by validation"
        );
        return None;
    }

    let (Some(start), Some(end)) = (start.map(str::trim), end.map(str::trim)) else {
        return None;
    };

    if start == end {
        context.validation_errors.push(ValidationError::new(
            InputField::End,
            "The destination capital must differ from the origin capital",
        ));
        return None;
    }

    context.validation_errors = validate_endpoints(graph, start, end);
    if !context.validation_errors.is_empty() {
        return None;
    }

    let model = select_cost_model(query.optimization, query.parameters);
    match find_cheapest_path(graph, start, end, model.as_ref(), &mut context.trace) {
        Ok(result) => {
            if !result.is_reachable() {
                context.route_error = Some(format!(
                    "Could not find a route between {} and {}. Check that the two capitals are connected.",
                    start, end
                ));
            }
            context.result = Some(result);
        }
        Err(err) => record_search_error(context, &err, end),
    }

    context.result.as_ref()
}

/// Unknown endpoints become validation errors on the field that named them;
/// anything else is a route error.
fn record_search_error(context: &mut QueryContext, err: &Error, end: &str) {
    match err {
        Error::UnknownNode { name, .. } => {
            let field = if name == end {
                InputField::End
            } else {
                InputField::Start
            };
            context
                .validation_errors
                .push(ValidationError::from_lookup(field, err));
        }
        other => {
            debug!(error = %other, "route search failed");
            context.route_error = Some(other.to_string());
        }
    }
}
