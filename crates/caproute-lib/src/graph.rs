use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a city name to be offered as a
/// suggestion when a lookup misses.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Raw per-city record as it appears in the dataset table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityData {
    /// Toll charged when the city is entered.
    pub toll: f64,
    /// Neighbouring city name mapped to the road distance in kilometres.
    #[serde(default)]
    pub neighbors: BTreeMap<String, f64>,
}

/// Raw dataset table: city name mapped to its record.
pub type CityTable = BTreeMap<String, CityData>;

/// Edge within the routing graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    toll: f64,
    edges: Vec<Edge>,
}

/// Immutable routing graph keyed by city name.
///
/// Construction validates referential integrity, so every edge target is
/// guaranteed to be a node of the graph. The adjacency is shared behind an
/// [`Arc`], which keeps clones cheap when several queries read the same map.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<BTreeMap<String, Node>>,
}

impl Graph {
    /// Build a graph from a parsed city table.
    ///
    /// Fails when a neighbour is missing from the table, or when any toll or
    /// distance is negative or not finite.
    pub fn from_table(table: CityTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let mut nodes = BTreeMap::new();
        for (name, data) in &table {
            check_value(name, "toll", data.toll)?;
            if data.toll < 0.0 {
                return Err(Error::NegativeToll {
                    node: name.clone(),
                    toll: data.toll,
                });
            }

            let mut edges = Vec::with_capacity(data.neighbors.len());
            for (neighbor, &distance) in &data.neighbors {
                if !table.contains_key(neighbor) {
                    return Err(Error::DanglingNeighbor {
                        node: name.clone(),
                        neighbor: neighbor.clone(),
                    });
                }
                check_value(name, "distance", distance)?;
                if distance < 0.0 {
                    return Err(Error::NegativeDistance {
                        from: name.clone(),
                        to: neighbor.clone(),
                        distance,
                    });
                }
                if neighbor == name {
                    warn!("city {} lists itself as a neighbour", name);
                }
                edges.push(Edge {
                    target: neighbor.clone(),
                    distance,
                });
            }

            nodes.insert(
                name.clone(),
                Node {
                    toll: data.toll,
                    edges,
                },
            );
        }

        debug!(
            "built graph with {} cities and {} edges",
            nodes.len(),
            nodes.values().map(|node| node.edges.len()).sum::<usize>()
        );

        Ok(Self {
            nodes: Arc::new(nodes),
        })
    }

    /// Parse a dataset from JSON and build the graph.
    ///
    /// Two layouts are accepted: an array of single-key objects
    /// (`[{"Recife": {...}}, ...]`) and a plain object keyed by city name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_table(parse_table(json)?)
    }

    /// Read a JSON dataset from any reader and build the graph.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Return the outgoing edges for a city, ordered by target name.
    pub fn neighbours(&self, node: &str) -> &[Edge] {
        self.nodes
            .get(node)
            .map(|node| node.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Distance of the direct edge between two cities, if one exists.
    pub fn distance(&self, from: &str, to: &str) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.distance)
    }

    /// Toll charged for entering `node`, or `None` for unknown cities.
    pub fn toll(&self, node: &str) -> Option<f64> {
        self.nodes.get(node).map(|node| node.toll)
    }

    /// Whether `node` is a city of this graph.
    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains_key(node)
    }

    /// All city names in lexicographic order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Owned, sorted list of city names suitable for selection lists.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lookup a city and return the graph's own copy of its name, or an
    /// [`Error::UnknownNode`] with suggestions when the name is not present.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        self.nodes
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
            .ok_or_else(|| Error::UnknownNode {
                name: name.to_string(),
                suggestions: self.fuzzy_matches(name, 3),
            })
    }

    /// City names similar to `name`, best match first, at most `limit` long.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .nodes()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

fn check_value(node: &str, field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFiniteValue {
            node: node.to_string(),
            field: field.to_string(),
        })
    }
}

/// Parse either dataset layout, picked by the first JSON token, so serde's
/// field-level errors reach the caller unchanged.
fn parse_table(json: &str) -> Result<CityTable> {
    match json.trim_start().as_bytes().first() {
        Some(b'[') => {
            let entries: Vec<BTreeMap<String, CityData>> = serde_json::from_str(json)?;
            entries_into_table(entries)
        }
        _ => Ok(serde_json::from_str(json)?),
    }
}

fn entries_into_table(entries: Vec<BTreeMap<String, CityData>>) -> Result<CityTable> {
    let mut table = CityTable::new();
    for (name, data) in entries.into_iter().flatten() {
        match table.entry(name) {
            Entry::Occupied(existing) => {
                return Err(Error::DuplicateNode {
                    node: existing.key().clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(data);
            }
        }
    }
    Ok(table)
}
