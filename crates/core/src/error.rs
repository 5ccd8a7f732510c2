use thiserror::Error;

/// Failure to read a schema document's top-level structure.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not valid JSON or does not have the shape of a schema document.
    #[error("failed to parse JSON schema document: {0}")]
    Json(#[from] serde_json::Error),
    /// The text is not valid YAML or does not have the shape of a schema document.
    #[error("failed to parse YAML schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
