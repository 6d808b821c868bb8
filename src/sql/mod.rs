//! Parsing of the schema definition file: `CREATE TABLE`, `CREATE INDEX` and
//! `ALTER TABLE ... ADD` constraint statements.

pub mod column_def;
pub mod constraints;
pub mod data_type;
pub mod data_value;
pub mod parser;
pub mod parser_utils;
pub mod statements;
