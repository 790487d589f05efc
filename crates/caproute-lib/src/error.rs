use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the caproute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Most variants describe a malformed dataset and are raised while the graph
/// is being built. [`Error::UnknownNode`] and [`Error::CostOverflow`] come from
/// the search itself. Query-time input problems are reported as
/// [`crate::ValidationError`] values instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A city lists a neighbour that is not itself a city of the graph.
    #[error("city {node} references unknown neighbour {neighbor}")]
    DanglingNeighbor { node: String, neighbor: String },

    /// An edge carries a negative distance.
    #[error("distance from {from} to {to} must not be negative, got {distance}")]
    NegativeDistance {
        from: String,
        to: String,
        distance: f64,
    },

    /// A city carries a negative toll.
    #[error("toll for {node} must not be negative, got {toll}")]
    NegativeToll { node: String, toll: f64 },

    /// A toll or distance is NaN or infinite.
    #[error("{field} for {node} must be a finite number")]
    NonFiniteValue { node: String, field: String },

    /// The same city appears twice in the source table.
    #[error("city {node} is defined more than once")]
    DuplicateNode { node: String },

    /// The source table contained no cities at all.
    #[error("graph dataset contains no cities")]
    EmptyGraph,

    /// Raised when a city name could not be found in the graph.
    #[error("unknown city name: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// A hop cost overflowed to infinity during the search.
    #[error("trip cost from {from} to {to} is too large to represent")]
    CostOverflow { from: String, to: String },

    /// Raised when a route summary is requested for an empty path.
    #[error("route result was empty")]
    EmptyRoute,

    /// Dataset could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// The dataset file was not valid JSON or had an unexpected shape.
    #[error("failed to parse graph dataset: {0}")]
    DatasetParse(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub(crate) fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_node_without_suggestions() {
        let err = Error::UnknownNode {
            name: "Atlantis".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown city name: Atlantis");
    }

    #[test]
    fn unknown_node_with_single_suggestion() {
        let err = Error::UnknownNode {
            name: "Recfe".to_string(),
            suggestions: vec!["Recife".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown city name: Recfe. Did you mean 'Recife'?"
        );
    }

    #[test]
    fn unknown_node_with_many_suggestions() {
        let err = Error::UnknownNode {
            name: "Bel".to_string(),
            suggestions: vec!["Belém".to_string(), "Belo Horizonte".to_string()],
        };
        assert!(err
            .to_string()
            .ends_with("Did you mean one of: 'Belém', 'Belo Horizonte'?"));
    }
}
