//! Error types for the generator.

use thiserror::Error;

/// Errors that can occur while generating the swagger config script.
///
/// Every variant is fatal for the run: the binary prints it and exits with
/// status 1 without writing any output.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The model description source does not exist.
    #[error("Prisma schema not found at '{path}'")]
    SchemaNotFound {
        /// The resolved absolute path that was checked.
        path: String,
    },

    /// The model description source exists but could not be read.
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No introspector can handle the given source.
    #[error("Introspection unavailable: {0}")]
    IntrospectionUnavailable(String),

    /// The introspection result is missing an expected member.
    #[error("Unexpected introspection result: {0}")]
    IntrospectionShape(String),

    /// The Prisma source could not be parsed.
    #[error("Failed to parse Prisma schema at line {line}: {message}")]
    ParseError {
        /// 1-based line number of the offending line.
        line: usize,
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The controllers glob is malformed or a match could not be read.
    #[error("Controller discovery failed: {0}")]
    GlobError(String),

    /// The documentation metadata could not be serialized.
    #[error("Failed to render generated script: {0}")]
    RenderError(#[from] serde_json::Error),

    /// Failed to write output file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
