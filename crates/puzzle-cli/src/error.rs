//! Error types for the puzzle CLI binary.
//!
//! [`CliError`] wraps every failure that can stop the session: startup
//! (configuration, scenario) and the stdin/stdout loop itself. Malformed
//! input lines are not errors; they are answered in-band.

/// Top-level error for the puzzle CLI binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: puzzle_engine::ConfigError,
    },

    /// The scenario could not be loaded or failed validation.
    #[error("scenario error: {source}")]
    Scenario {
        /// The underlying scenario error.
        #[from]
        source: puzzle_engine::ScenarioError,
    },

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A reply could not be encoded.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
