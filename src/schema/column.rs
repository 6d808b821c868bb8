use serde::{Deserialize, Serialize};

use crate::sql::data_type::DataType;
use crate::sql::data_value::DataValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOptions {
    pub null: bool,
    pub default: Option<DataValue>,
    pub limit: Option<u32>,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        ColumnOptions {
            null: true,
            default: None,
            limit: None,
        }
    }
}

impl ColumnOptions {
    pub fn new() -> Self {
        ColumnOptions::default()
    }

    pub fn not_null(mut self) -> Self {
        self.null = false;
        self
    }

    pub fn default_value(mut self, value: DataValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A column as declared in a table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub options: ColumnOptions,
    /// Declared value type of a primary key column, when it is not the
    /// integer the key would otherwise read back as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<DataType>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType, options: ColumnOptions) -> Self {
        ColumnDefinition {
            name: name.to_string(),
            data_type,
            options,
            key_type: None,
        }
    }

    /// A primary key column whose values are of `key_type`.
    pub fn primary_key(name: &str, key_type: DataType, options: ColumnOptions) -> Self {
        ColumnDefinition {
            key_type: Some(key_type.normalized()),
            ..ColumnDefinition::new(name, DataType::PrimaryKey, options)
        }
    }
}

/// A column as reported back to callers.
///
/// `sql_type` is the declared type tag; `data_type` is what values of the
/// column read back as, so a `PrimaryKey` column reports `Integer` there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub default: Option<DataValue>,
    pub data_type: DataType,
    pub null: bool,
    pub sql_type: DataType,
    pub limit: Option<u32>,
}

impl Column {
    pub fn is_primary_key(&self) -> bool {
        self.sql_type == DataType::PrimaryKey
    }
}

impl From<&ColumnDefinition> for Column {
    fn from(definition: &ColumnDefinition) -> Self {
        Column {
            name: definition.name.clone(),
            default: definition.options.default.clone(),
            data_type: definition
                .key_type
                .clone()
                .unwrap_or_else(|| definition.data_type.normalized()),
            null: definition.options.null,
            sql_type: definition.data_type.clone(),
            limit: definition.options.limit,
        }
    }
}
