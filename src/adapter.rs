use std::any::Any;

use crate::error::Result;
use crate::result::{QueryResult, Row};
use crate::schema::column::Column;
use crate::sql::data_value::DataValue;

/// The statement surface an ORM drives a database connection through.
///
/// A real connection can fail on any of these; the null connection never does.
pub trait Adapter: Send + Sync {
    fn adapter_name(&self) -> &str;

    fn supports_migrations(&self) -> bool {
        false
    }

    fn insert(&self, sql: &str, id_value: Option<u64>) -> Result<u64>;

    fn update(&self, sql: &str) -> Result<u64>;

    fn delete(&self, sql: &str) -> Result<u64>;

    fn select_all(&self, sql: &str) -> Result<Vec<Row>>;

    fn select_one(&self, sql: &str) -> Result<Option<Row>>;

    fn select_value(&self, sql: &str) -> Result<Option<DataValue>>;

    fn select_rows(&self, sql: &str) -> Result<Vec<Vec<DataValue>>>;

    fn exec_query(&self, sql: &str) -> Result<QueryResult>;

    fn columns(&self, table: &str) -> Result<Vec<Column>>;

    fn primary_key(&self, table: &str) -> Result<String>;

    fn as_any(&self) -> &dyn Any;
}
