#![allow(dead_code)]

use std::path::PathBuf;

use caproute_lib::{CityData, CityTable, Graph};

pub const EPSILON: f64 = 1e-9;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Build a table from `(city, toll, [(neighbour, distance)])` rows.
pub fn table(rows: &[(&str, f64, &[(&str, f64)])]) -> CityTable {
    rows.iter()
        .map(|(name, toll, neighbors)| {
            (
                name.to_string(),
                CityData {
                    toll: *toll,
                    neighbors: neighbors
                        .iter()
                        .map(|(neighbor, distance)| (neighbor.to_string(), *distance))
                        .collect(),
                },
            )
        })
        .collect()
}

/// A -10- B -5- C with a toll of 2 at B, plus an isolated city D.
pub fn triangle_graph() -> Graph {
    Graph::from_table(table(&[
        ("A", 0.0, &[("B", 10.0)]),
        ("B", 2.0, &[("A", 10.0), ("C", 5.0)]),
        ("C", 0.0, &[("B", 5.0)]),
        ("D", 0.0, &[]),
    ]))
    .expect("triangle graph is valid")
}

/// Short route through an expensive toll versus a longer toll-free detour.
///
/// A -10- B -10- D with a toll of 100 at B, and A -15- C -15- D toll free.
pub fn toll_trap_graph() -> Graph {
    Graph::from_table(table(&[
        ("A", 0.0, &[("B", 10.0), ("C", 15.0)]),
        ("B", 100.0, &[("A", 10.0), ("D", 10.0)]),
        ("C", 0.0, &[("A", 15.0), ("D", 15.0)]),
        ("D", 0.0, &[("B", 10.0), ("C", 15.0)]),
    ]))
    .expect("toll trap graph is valid")
}

/// Copy of `graph` with every toll set to zero.
pub fn without_tolls(graph: &Graph) -> Graph {
    let table: CityTable = graph
        .nodes()
        .map(|node| {
            (
                node.to_string(),
                CityData {
                    toll: 0.0,
                    neighbors: graph
                        .neighbours(node)
                        .iter()
                        .map(|edge| (edge.target.clone(), edge.distance))
                        .collect(),
                },
            )
        })
        .collect();
    Graph::from_table(table).expect("toll-free copy is valid")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
