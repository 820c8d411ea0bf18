//! Error types for the advisory engine

use thiserror::Error;

/// Result type alias for the advisory engine
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Main error type for the advisory engine
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider is not present in the catalog
    #[error("Unknown cloud provider: {0}")]
    UnknownProvider(String),

    /// Instance type is not present in the catalog for the given provider
    #[error("Unknown instance type: {provider}/{instance_type}")]
    UnknownInstance {
        provider: String,
        instance_type: String,
    },

    /// Input configuration is missing data a strategy requires
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No candidate instance satisfies the search constraints
    #[error("No matching instance: {0}")]
    NoMatch(String),

    /// Required external data is absent or unusable
    #[error("No data available: {0}")]
    NoData(String),

    /// More than one candidate ties for the optimum
    #[error("Ambiguous result: {0}")]
    AmbiguousResult(String),

    /// Cost/impact evaluator failures
    #[error("Adapter error: {0}")]
    Adapter(String),

    /// Persistent cache tier failures
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Catalog loading errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdvisorError {
    /// Whether the error is addressable by the caller (bad input, empty
    /// search space) as opposed to an internal or infrastructure failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownProvider(_)
                | Self::UnknownInstance { .. }
                | Self::InvalidConfiguration(_)
                | Self::NoMatch(_)
                | Self::NoData(_)
                | Self::AmbiguousResult(_)
        )
    }
}
