use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the routefinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Problem file could not be located at the given path.
    #[error("input file '{}' not found", path.display())]
    InputNotFound { path: PathBuf },

    /// A line inside a recognised section could not be parsed.
    #[error("malformed input on line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// The `Origin:` section was absent or empty.
    #[error("no origin node specified in input file")]
    MissingOrigin,

    /// The `Destinations:` section was absent or empty.
    #[error("no destination nodes specified in input file")]
    MissingDestinations,

    /// Neither nodes nor edges were declared.
    #[error("no graph edges found in input file")]
    EmptyGraph,

    /// A heuristic was requested for a node without a coordinate.
    #[error("no coordinate declared for node {node}")]
    MissingCoordinate { node: NodeId },

    /// Raised when a method name does not resolve to a search strategy.
    #[error("unknown search method: {name}{}", format_suggestion(.suggestion.as_deref()))]
    UnknownStrategy {
        name: String,
        suggestion: Option<String>,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error stems from the problem description rather than the search itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InputNotFound { .. }
                | Error::MalformedInput { .. }
                | Error::MissingOrigin
                | Error::MissingDestinations
                | Error::EmptyGraph
                | Error::Io(_)
        )
    }
}

fn format_suggestion(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(name) => format!(". Did you mean '{}'?", name),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_mentions_suggestion() {
        let error = Error::UnknownStrategy {
            name: "BSF".to_string(),
            suggestion: Some("BFS".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "unknown search method: BSF. Did you mean 'BFS'?"
        );
    }

    #[test]
    fn unknown_strategy_without_suggestion() {
        let error = Error::UnknownStrategy {
            name: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(error.to_string(), "unknown search method: zzz");
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(Error::MissingOrigin.is_input_error());
        assert!(!Error::MissingCoordinate { node: 3 }.is_input_error());
    }
}
