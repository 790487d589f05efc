//! Route command handler for computing the cheapest trip between two capitals.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use tracing::debug;

use caproute_lib::{
    ensure_graph, run_query, QueryOutcome, RouteQuery, RouteSummary, TraversalParameters,
};

use crate::output::{format_trace, format_validation_errors, render_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Route optimization objective as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RouteOptimization {
    /// Cheapest trip: fuel plus tolls.
    #[default]
    Cost,
    /// Shortest driven distance.
    Distance,
}

impl From<RouteOptimization> for caproute_lib::RouteOptimization {
    fn from(value: RouteOptimization) -> Self {
        match value {
            RouteOptimization::Cost => caproute_lib::RouteOptimization::Cost,
            RouteOptimization::Distance => caproute_lib::RouteOptimization::Distance,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Origin capital.
    pub from: String,
    /// Destination capital.
    pub to: String,
    /// Fuel price per liter.
    pub fuel_price: f64,
    /// Vehicle efficiency in km per liter.
    pub efficiency: f64,
    pub optimize: RouteOptimization,
    /// Print the search trace before the result.
    pub trace: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library query.
    pub fn to_query(&self) -> RouteQuery {
        RouteQuery::new(self.from.as_str(), self.to.as_str())
            .with_parameters(TraversalParameters::new(self.fuel_price, self.efficiency))
            .with_optimization(self.optimize.into())
    }
}

/// How a route command ended, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Found,
    /// Input failed validation; no search ran.
    Rejected,
    Unreachable,
}

impl RouteStatus {
    pub fn of(outcome: &QueryOutcome) -> Self {
        if !outcome.validation_errors.is_empty() {
            RouteStatus::Rejected
        } else if outcome.is_success() {
            RouteStatus::Found
        } else {
            RouteStatus::Unreachable
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            RouteStatus::Found => ExitCode::SUCCESS,
            RouteStatus::Rejected | RouteStatus::Unreachable => ExitCode::FAILURE,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    target_path: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<RouteStatus> {
    let graph = ensure_graph(target_path).context("failed to load the capital-city dataset")?;
    let query = args.to_query();
    let outcome = run_query(&graph, &query);
    let status = RouteStatus::of(&outcome);
    debug!(?status, trace_entries = outcome.trace.len(), "route query finished");

    let Some(mode) = format.render_mode() else {
        render_json(&outcome).context("failed to write JSON output")?;
        return Ok(status);
    };

    if args.trace {
        print!("{}", format_trace(&outcome.trace, &ColorPalette::detect()));
        println!();
    }

    match status {
        RouteStatus::Rejected => {
            eprint!("{}", format_validation_errors(&outcome.validation_errors));
        }
        RouteStatus::Unreachable => {
            let message = outcome
                .route_error
                .as_deref()
                .unwrap_or("No route found between the selected capitals.");
            eprintln!("{message}");
        }
        RouteStatus::Found => {
            let Some(result) = outcome.result.as_ref() else {
                bail!("route search reported success without a result");
            };
            let summary =
                RouteSummary::from_result(&graph, &query.parameters, query.optimization, result)
                    .context("failed to build route summary for display")?;
            print!("{}", summary.render(mode));
        }
    }

    Ok(status)
}
