use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexOptions {
    pub name: Option<String>,
    pub unique: bool,
}

impl IndexOptions {
    pub fn unique() -> Self {
        IndexOptions {
            name: None,
            unique: true,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub table: String,
    pub name: String,
    pub unique: bool,
    pub columns: Vec<String>,
}

impl IndexDefinition {
    pub fn new(table: &str, columns: &[&str], options: IndexOptions) -> Self {
        let name = options
            .name
            .unwrap_or_else(|| default_index_name(table, columns));
        IndexDefinition {
            table: table.to_string(),
            name,
            unique: options.unique,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// `index_<table>_on_<col>[_and_<col>...]`
pub fn default_index_name(table: &str, columns: &[&str]) -> String {
    format!("index_{}_on_{}", table, columns.join("_and_"))
}
