//! Dataset resolution through the environment.
//!
//! Kept in its own test binary because it mutates process environment.

mod common;

use std::path::PathBuf;

use caproute_lib::dataset::DATASET_ENV_VAR;
use caproute_lib::{ensure_graph, resolve_dataset_source, DatasetSource};

use common::fixtures_dir;

#[test]
fn dataset_resolution_order() {
    std::env::remove_var(DATASET_ENV_VAR);
    assert_eq!(resolve_dataset_source(None), DatasetSource::Bundled);
    assert_eq!(ensure_graph(None).expect("bundled").len(), 27);

    let fixture = fixtures_dir().join("triangle.json");
    std::env::set_var(DATASET_ENV_VAR, &fixture);
    assert_eq!(
        resolve_dataset_source(None),
        DatasetSource::File(fixture.clone())
    );
    assert_eq!(ensure_graph(None).expect("env dataset").len(), 4);

    let explicit = PathBuf::from("/elsewhere/graph.json");
    assert_eq!(
        resolve_dataset_source(Some(&explicit)),
        DatasetSource::File(explicit.clone())
    );

    std::env::set_var(DATASET_ENV_VAR, "");
    assert_eq!(resolve_dataset_source(None), DatasetSource::Bundled);

    std::env::remove_var(DATASET_ENV_VAR);
}
