use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use super::column::ColumnOptions;
use super::index::{IndexDefinition, IndexOptions};
use super::table::{TableDefinition, TableOptions};
use super::SchemaStatements;
use crate::error::{NullDBError, Result};
use crate::sql::column_def::ColumnDef;
use crate::sql::constraints::constraint::TableConstraint;
use crate::sql::parser::Parser;
use crate::sql::statements::alter::AlterStatement;
use crate::sql::statements::create::CreateStatement;
use crate::sql::statements::Statement;

/// Replays an external schema definition against a schema registry.
pub trait SchemaLoader: Send + Sync {
    fn load(&self, path: &Path, schema: &mut dyn SchemaStatements) -> Result<()>;
}

impl<F> SchemaLoader for F
where
    F: Fn(&Path, &mut dyn SchemaStatements) -> Result<()> + Send + Sync,
{
    fn load(&self, path: &Path, schema: &mut dyn SchemaStatements) -> Result<()> {
        self(path, schema)
    }
}

/// Loads a file of SQL DDL statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdlSchemaLoader;

impl SchemaLoader for DdlSchemaLoader {
    fn load(&self, path: &Path, schema: &mut dyn SchemaStatements) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| NullDBError::SchemaLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let statements = Parser::parse_schema(&source).map_err(|e| NullDBError::SchemaLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        info!("Loading {} schema statements from {}", statements.len(), path.display());
        apply_statements(statements, schema);
        Ok(())
    }
}

/// Replays parsed statements in order. A single-column primary key added by a
/// later `ALTER TABLE` is declared when its table is created.
pub fn apply_statements(statements: Vec<Statement>, schema: &mut dyn SchemaStatements) {
    let altered_keys = altered_primary_keys(&statements);
    for statement in statements {
        match statement {
            Statement::Create(create) => {
                let key = create
                    .primary_key_column()
                    .map(str::to_string)
                    .or_else(|| altered_keys.get(&create.table_name).cloned());
                apply_create(create, key.as_deref(), schema);
            }
            Statement::CreateIndex(index) => {
                let columns: Vec<&str> = index.columns.iter().map(String::as_str).collect();
                let options = IndexOptions {
                    name: index.name,
                    unique: index.unique,
                };
                schema.add_index(IndexDefinition::new(&index.table_name, &columns, options));
            }
            Statement::Alter(alter) => apply_constraint(&alter.table_name, alter.constraint, schema),
        }
    }
}

fn altered_primary_keys(statements: &[Statement]) -> HashMap<String, String> {
    statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::Alter(AlterStatement {
                table_name,
                constraint: TableConstraint::PrimaryKey { columns, .. },
            }) if columns.len() == 1 => Some((table_name.clone(), columns[0].clone())),
            _ => None,
        })
        .collect()
}

fn apply_create(create: CreateStatement, key: Option<&str>, schema: &mut dyn SchemaStatements) {
    let key = key.filter(|key| create.columns.iter().any(|c| c.name == *key));
    let options = if create.without_rowid || key.is_some() {
        TableOptions::without_id()
    } else {
        TableOptions::default()
    };
    let mut table = TableDefinition::new(&create.table_name, options);
    for column in &create.columns {
        // A redeclared implicit key stays the key.
        let is_key = key == Some(column.name.as_str()) || table.is_primary_key(&column.name);
        declare_column(&mut table, column, is_key);
    }
    schema.create_table(table);

    for constraint in create.constraints {
        apply_constraint(&create.table_name, constraint, schema);
    }
}

fn declare_column(table: &mut TableDefinition, column: &ColumnDef, is_key: bool) {
    let mut options = ColumnOptions::new();
    options.null = column.nullable();
    options.default = column.default_value().cloned();
    options.limit = column.limit;
    if is_key {
        table.typed_primary_key(&column.name, column.data_type.clone(), options);
    } else {
        table.column(&column.name, column.data_type.clone(), options);
    }
}

fn apply_constraint(table: &str, constraint: TableConstraint, schema: &mut dyn SchemaStatements) {
    match constraint {
        TableConstraint::PrimaryKey { columns, .. } => {
            debug!("Ignoring primary key constraint on {}", table);
            schema.add_pk_constraint(table, &columns);
        }
        TableConstraint::ForeignKey {
            columns, references, ..
        } => {
            debug!("Ignoring foreign key constraint on {}", table);
            schema.add_fk_constraint(table, &columns, &references.table_name);
        }
    }
}
