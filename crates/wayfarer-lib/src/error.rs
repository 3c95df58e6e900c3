use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Wayfarer library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A numeric field in an ingestion record failed to parse.
    #[error("line {line}: invalid {field} value '{value}': {source}")]
    ParseFailure {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// An ingestion record had fewer pipe-separated fields than required.
    #[error("line {line}: expected {expected} fields separated by '|', found {found}")]
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a location name could not be found in the registry.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a route references an endpoint that was never registered.
    #[error("route {origin} -> {destination} references unregistered location {missing}")]
    UnregisteredEndpoint {
        origin: String,
        destination: String,
        missing: String,
    },

    /// Raised when no route could be found between two locations.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a cost criterion name is not recognised.
    #[error("unknown cost criterion '{name}'; expected one of: fuel, physical_wear, distance")]
    UnknownCriterion { name: String },

    /// Raised when a transport mode name is not recognised.
    #[error("unknown transport mode '{name}'; expected vehicle or walking")]
    UnknownTransportMode { name: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for route data")]
    ProjectDirsUnavailable,

    /// A required data file does not exist at the resolved path.
    #[error("data file not found at {path}")]
    DataFileNotFound { path: PathBuf },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for record reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
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
