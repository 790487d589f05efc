use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Environment variable that points at a JSON dataset to use instead of the
/// bundled one.
pub const DATASET_ENV_VAR: &str = "CAPROUTE_DATASET";

/// Road network between the 27 Brazilian state capitals, compiled into the
/// library so the CLI works without any external files.
const BUNDLED_DATASET: &str = include_str!("../data/capitais.json");

static BUNDLED_GRAPH: OnceCell<Graph> = OnceCell::new();

/// Where the graph dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// JSON file on disk.
    File(PathBuf),
    /// Dataset compiled into the library.
    Bundled,
}

/// Resolve the dataset source.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `CAPROUTE_DATASET` environment variable.
/// 3. The bundled capitals dataset.
pub fn resolve_dataset_source(target: Option<&Path>) -> DatasetSource {
    if let Some(explicit) = target {
        return DatasetSource::File(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os(DATASET_ENV_VAR) {
        if !env_path.is_empty() {
            return DatasetSource::File(PathBuf::from(env_path));
        }
    }

    DatasetSource::Bundled
}

/// Load a graph from the given source.
pub fn load_graph(source: &DatasetSource) -> Result<Graph> {
    match source {
        DatasetSource::Bundled => bundled_graph(),
        DatasetSource::File(path) => load_graph_file(path),
    }
}

/// Resolve the dataset source for `target` and load it.
pub fn ensure_graph(target: Option<&Path>) -> Result<Graph> {
    let source = resolve_dataset_source(target);
    debug!("loading graph dataset from {:?}", source);
    load_graph(&source)
}

/// Load and validate a JSON dataset file.
pub fn load_graph_file(path: &Path) -> Result<Graph> {
    if !path.is_file() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = fs::File::open(path)?;
    let graph = Graph::from_reader(std::io::BufReader::new(file))?;
    info!("loaded {} cities from {}", graph.len(), path.display());
    Ok(graph)
}

/// The bundled capitals graph, parsed once per process.
pub fn bundled_graph() -> Result<Graph> {
    BUNDLED_GRAPH
        .get_or_try_init(|| Graph::from_json_str(BUNDLED_DATASET))
        .cloned()
}
