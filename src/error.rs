use thiserror::Error;

/// Custom error type for Converso operations.
#[derive(Debug, Error)]
pub enum ConversoError {
    /// Annotation corpus could not be read or parsed.
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Graph construction or analysis failed.
    #[error("Graph error: {0}")]
    Graph(String),

    /// Writing the output graph failed.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<serde_json::Error> for ConversoError {
    fn from(err: serde_json::Error) -> Self {
        ConversoError::Annotation(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ConversoError {
    fn from(err: std::io::Error) -> Self {
        ConversoError::Annotation(format!("I/O error: {}", err))
    }
}

impl From<toml::de::Error> for ConversoError {
    fn from(err: toml::de::Error) -> Self {
        ConversoError::Config(err.to_string())
    }
}
