use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurrowError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),
    #[error("Tree not found: {0}")]
    TreeNotFound(String),
    #[error("Tree already exists: {0}")]
    TreeExists(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("External command failed: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, BurrowError>;
