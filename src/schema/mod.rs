//! Table metadata: the side-table a connection answers `columns`,
//! `primary_key`, `tables` and `indexes` from.

pub mod column;
pub mod index;
pub mod loader;
pub mod table;

use std::collections::HashMap;

use log::debug;

use self::index::IndexDefinition;
use self::table::{TableDefinition, TableOptions};

/// Bookkeeping table every registry starts out with.
pub const SCHEMA_INFO_TABLE: &str = "schema_info";

/// Lifecycle of the one-time schema load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    NotLoaded,
    Loading,
    Loaded,
}

/// The calls a schema definition is replayed through.
pub trait SchemaStatements {
    fn create_table(&mut self, table: TableDefinition);

    fn add_index(&mut self, index: IndexDefinition);

    fn add_fk_constraint(&mut self, _table: &str, _columns: &[String], _references: &str) {}

    fn add_pk_constraint(&mut self, _table: &str, _columns: &[String]) {}
}

#[derive(Debug, Clone)]
pub struct Schema {
    state: SchemaState,
    tables: HashMap<String, TableDefinition>,
    indexes: HashMap<String, Vec<IndexDefinition>>,
}

impl Default for Schema {
    fn default() -> Self {
        Schema::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            SCHEMA_INFO_TABLE.to_string(),
            TableDefinition::new(SCHEMA_INFO_TABLE, TableOptions::without_id()),
        );
        Schema {
            state: SchemaState::NotLoaded,
            tables,
            indexes: HashMap::new(),
        }
    }

    pub fn state(&self) -> SchemaState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: SchemaState) {
        self.state = state;
    }

    /// True while nothing but the bookkeeping table has been defined.
    pub fn is_pristine(&self) -> bool {
        self.tables.len() <= 1
    }

    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.get(name)
    }

    /// Defined table names, sorted, without the bookkeeping table.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tables
            .keys()
            .filter(|name| name.as_str() != SCHEMA_INFO_TABLE)
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn indexes(&self, table: &str) -> Vec<IndexDefinition> {
        self.indexes.get(table).cloned().unwrap_or_default()
    }
}

impl SchemaStatements for Schema {
    fn create_table(&mut self, table: TableDefinition) {
        debug!(
            "Defining table {} with {} columns",
            table.name(),
            table.columns().len()
        );
        self.tables.insert(table.name().to_string(), table);
    }

    fn add_index(&mut self, index: IndexDefinition) {
        debug!("Defining index {} on {}", index.name, index.table);
        let indexes = self.indexes.entry(index.table.clone()).or_default();
        indexes.retain(|existing| existing.name != index.name);
        indexes.push(index);
    }
}
