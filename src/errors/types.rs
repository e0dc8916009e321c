use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    /// Malformed or missing input, caught before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure, non-success HTTP status or unparsable body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success response missing a field the client depends on.
    #[error("Data error: {0}")]
    Data(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
