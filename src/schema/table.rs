use serde::{Deserialize, Serialize};

use super::column::{Column, ColumnDefinition, ColumnOptions};
use crate::sql::data_type::DataType;

pub const DEFAULT_PRIMARY_KEY: &str = "id";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Add the implicit primary key column.
    pub id: bool,
    /// Name of the implicit primary key column, `id` by default.
    pub primary_key: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            id: true,
            primary_key: None,
        }
    }
}

impl TableOptions {
    pub fn without_id() -> Self {
        TableOptions {
            id: false,
            primary_key: None,
        }
    }

    pub fn with_primary_key(name: &str) -> Self {
        TableOptions {
            id: true,
            primary_key: Some(name.to_string()),
        }
    }
}

/// An ordered set of columns under a table name. Handed to the builder
/// callback of `create_table`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    name: String,
    columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str, options: TableOptions) -> Self {
        let mut table = TableDefinition {
            name: name.to_string(),
            columns: Vec::new(),
        };
        if options.id {
            let key = options.primary_key.as_deref().unwrap_or(DEFAULT_PRIMARY_KEY);
            table.primary_key(key);
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a column. Redeclaring a name replaces the earlier column in
    /// place.
    pub fn column(&mut self, name: &str, data_type: DataType, options: ColumnOptions) -> &mut Self {
        self.define(ColumnDefinition::new(name, data_type, options))
    }

    pub fn primary_key(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::PrimaryKey, ColumnOptions::new().not_null())
    }

    /// A primary key whose values read back as `key_type` rather than integers.
    pub fn typed_primary_key(&mut self, name: &str, key_type: DataType, options: ColumnOptions) -> &mut Self {
        self.define(ColumnDefinition::primary_key(name, key_type, options.not_null()))
    }

    pub fn is_primary_key(&self, name: &str) -> bool {
        self.columns
            .iter()
            .any(|c| c.name == name && c.data_type == DataType::PrimaryKey)
    }

    fn define(&mut self, definition: ColumnDefinition) -> &mut Self {
        match self.columns.iter_mut().find(|c| c.name == definition.name) {
            Some(existing) => *existing = definition,
            None => self.columns.push(definition),
        }
        self
    }

    pub fn string(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::String, ColumnOptions::new())
    }

    pub fn text(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::Text, ColumnOptions::new())
    }

    pub fn integer(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::Integer, ColumnOptions::new())
    }

    pub fn float(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::Float, ColumnOptions::new())
    }

    pub fn boolean(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::Boolean, ColumnOptions::new())
    }

    pub fn date(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::Date, ColumnOptions::new())
    }

    pub fn timestamp(&mut self, name: &str) -> &mut Self {
        self.column(name, DataType::Timestamp, ColumnOptions::new())
    }

    /// `created_at` and `updated_at`.
    pub fn timestamps(&mut self) -> &mut Self {
        self.column("created_at", DataType::Timestamp, ColumnOptions::new().not_null())
            .column("updated_at", DataType::Timestamp, ColumnOptions::new().not_null())
    }

    /// An integer `<name>_id` column pointing at another table.
    pub fn references(&mut self, name: &str) -> &mut Self {
        self.integer(&format!("{}_id", name))
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    pub fn column_descriptors(&self) -> Vec<Column> {
        self.columns.iter().map(Column::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(table: &TableDefinition) -> Vec<&str> {
        table.columns().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_implicit_id_column() {
        let mut table = TableDefinition::new("widgets", TableOptions::default());
        table.string("name");
        assert_eq!(names(&table), vec!["id", "name"]);
        assert_eq!(table.columns()[0].data_type, DataType::PrimaryKey);
    }

    #[test]
    fn test_without_id() {
        let mut table = TableDefinition::new("widgets", TableOptions::without_id());
        table.string("name");
        assert_eq!(names(&table), vec!["name"]);
    }

    #[test]
    fn test_custom_primary_key_name() {
        let table = TableDefinition::new("legacy", TableOptions::with_primary_key("legacy_id"));
        assert_eq!(names(&table), vec!["legacy_id"]);
    }

    #[test]
    fn test_typed_primary_key() {
        let mut table = TableDefinition::new("codes", TableOptions::without_id());
        table.typed_primary_key("code", DataType::Text, ColumnOptions::new());
        assert!(table.is_primary_key("code"));
        assert!(!table.columns()[0].options.null);

        let code = &table.column_descriptors()[0];
        assert_eq!(code.data_type, DataType::Text);
        assert_eq!(code.sql_type, DataType::PrimaryKey);
    }

    #[test]
    fn test_helpers_and_redeclaration() {
        let mut table = TableDefinition::new("posts", TableOptions::default());
        table
            .string("title")
            .references("author")
            .timestamps()
            .text("title");
        assert_eq!(names(&table), vec!["id", "title", "author_id", "created_at", "updated_at"]);
        assert_eq!(table.columns()[1].data_type, DataType::Text);
        assert!(!table.columns()[3].options.null);
    }
}
