//! A database connection that runs nothing.
//!
//! [`NullConnection`] stands in for a real database during tests. Every
//! statement an ORM would send is tagged with the operation that produced it
//! and appended to an [`ExecutionLog`]; every query comes back empty. Tests
//! then assert on the log, usually on the part written since the last
//! checkpoint.

pub mod adapter;
pub mod config;
pub mod connection;
pub mod entry_point;
pub mod error;
pub mod execution_log;
pub mod handler;
pub mod result;
pub mod schema;
pub mod sql;
pub mod statement;


pub use adapter::Adapter;
pub use config::NullDBConfig;
pub use connection::NullConnection;
pub use error::{NullDBError, Result};
pub use execution_log::ExecutionLog;
pub use handler::{ConnectionHandler, Nullified};
pub use result::{NullObject, QueryResult, Row};
pub use schema::column::{Column, ColumnOptions};
pub use schema::index::IndexOptions;
pub use schema::table::{TableDefinition, TableOptions};
pub use sql::data_type::DataType;
pub use sql::data_value::DataValue;
pub use statement::{EntryPoint, Statement};
