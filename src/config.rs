use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{NullDBError, Result};

pub const DEFAULT_SCHEMA_PATH: &str = "db/schema.sql";
pub const ADAPTER_KEY: &str = "adapter";
pub const ADAPTER_MARKER: &str = "nulldb";

fn default_schema() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEMA_PATH)
}

/// Construction options for a [`NullConnection`](crate::NullConnection).
///
/// Keys other than `schema` and `project_root` are kept as-is and reported
/// back by `configuration()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullDBConfig {
    #[serde(default = "default_schema")]
    pub schema: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for NullDBConfig {
    fn default() -> Self {
        NullDBConfig {
            schema: default_schema(),
            project_root: None,
            extra: BTreeMap::new(),
        }
    }
}

impl NullDBConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let cfg: NullDBConfig = serde_yaml::from_str(content)?;
        if cfg.schema.as_os_str().is_empty() {
            return Err(NullDBError::Config("schema path must not be empty".to_string()));
        }
        Ok(cfg)
    }

    pub fn with_schema<P: Into<PathBuf>>(mut self, schema: P) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_project_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn with_option(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// The schema path, resolved against the project root when relative.
    pub fn schema_path(&self) -> PathBuf {
        match &self.project_root {
            Some(root) if self.schema.is_relative() => root.join(&self.schema),
            _ => self.schema.clone(),
        }
    }

    /// Every option the connection was built with, marked as a null adapter.
    pub fn configuration(&self) -> BTreeMap<String, Value> {
        let mut configuration = self.extra.clone();
        configuration.insert(
            "schema".to_string(),
            Value::String(self.schema.to_string_lossy().into_owned()),
        );
        configuration.insert(
            ADAPTER_KEY.to_string(),
            Value::String(ADAPTER_MARKER.to_string()),
        );
        configuration
    }
}
