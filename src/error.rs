use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NullDBError {
    #[error("no primary key column found for table '{0}'")]
    PrimaryKeyNotFound(String),
    #[error("failed to load schema from {}: {message}", path.display())]
    SchemaLoad { path: PathBuf, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NullDBError>;
