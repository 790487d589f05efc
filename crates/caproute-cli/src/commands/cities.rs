//! Cities command handler listing the capitals in the loaded dataset.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use caproute_lib::{ensure_graph, Graph};

use crate::output::{format_city_table, render_json, OutputFormat};
use crate::terminal::ColorPalette;

/// One row of the city listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityListing {
    pub name: String,
    pub toll: f64,
    pub neighbours: usize,
}

/// Collect the listing rows in name order.
pub fn city_listings(graph: &Graph) -> Vec<CityListing> {
    graph
        .nodes()
        .map(|name| CityListing {
            name: name.to_string(),
            toll: graph.toll(name).unwrap_or_default(),
            neighbours: graph.neighbours(name).len(),
        })
        .collect()
}

/// Handle the cities subcommand.
pub fn handle_cities_command(target_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let graph = ensure_graph(target_path).context("failed to load the capital-city dataset")?;

    if format.is_json() {
        render_json(&city_listings(&graph)).context("failed to write JSON output")?;
    } else {
        print!("{}", format_city_table(&graph, &ColorPalette::detect()));
    }
    Ok(())
}
