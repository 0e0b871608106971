//! Error types for the grid engine
//!
//! The processing stages never fail. Errors only surface at the boundary:
//! view-state mutations naming unknown columns, schema validation and config IO.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// A view mutation referenced a column key that is not in the schema
    #[snafu(display("Unknown column: {key}"))]
    UnknownColumn { key: String },

    /// Two schema entries share the same key
    #[snafu(display("Duplicate column: {key}"))]
    DuplicateColumn { key: String },

    /// Page numbers are 1-based
    #[snafu(display("Invalid page: {page}"))]
    InvalidPage { page: usize },

    /// Page size must be positive
    #[snafu(display("Invalid page size: {size}"))]
    InvalidPageSize { size: usize },

    /// IO error (config and data files)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
