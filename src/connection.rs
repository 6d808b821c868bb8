use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info, warn};
use serde_yaml::Value;

use crate::adapter::Adapter;
use crate::config::NullDBConfig;
use crate::entry_point::{self, with_entry_point};
use crate::error::{NullDBError, Result};
use crate::execution_log::ExecutionLog;
use crate::result::{NullObject, QueryResult, Row};
use crate::schema::column::Column;
use crate::schema::index::{IndexDefinition, IndexOptions};
use crate::schema::loader::{DdlSchemaLoader, SchemaLoader};
use crate::schema::table::{TableDefinition, TableOptions};
use crate::schema::{Schema, SchemaState, SchemaStatements};
use crate::sql::data_value::DataValue;
use crate::statement::{EntryPoint, Statement};

pub const ADAPTER_NAME: &str = "NullDB";

/// A database connection that executes nothing.
///
/// Every statement is tagged with the operation it came from and appended to
/// the execution log; every query answers with an empty result. The
/// connection is `Send + Sync`: the log and the id counter are shared, the
/// entry-point tag is per thread.
pub struct NullConnection {
    config: NullDBConfig,
    execution_log: RwLock<ExecutionLog>,
    last_unique_id: AtomicU64,
    schema: Mutex<Schema>,
    loader: Arc<dyn SchemaLoader>,
}

impl Default for NullConnection {
    fn default() -> Self {
        NullConnection::new(NullDBConfig::default())
    }
}

impl NullConnection {
    pub fn new(config: NullDBConfig) -> Self {
        NullConnection::with_loader(config, Arc::new(DdlSchemaLoader))
    }

    pub fn with_loader(config: NullDBConfig, loader: Arc<dyn SchemaLoader>) -> Self {
        NullConnection {
            config,
            execution_log: RwLock::new(ExecutionLog::new()),
            last_unique_id: AtomicU64::new(0),
            schema: Mutex::new(Schema::new()),
            loader,
        }
    }

    pub fn adapter_name(&self) -> &'static str {
        ADAPTER_NAME
    }

    pub fn supports_migrations(&self) -> bool {
        true
    }

    pub fn config(&self) -> &NullDBConfig {
        &self.config
    }

    pub fn configuration(&self) -> BTreeMap<String, Value> {
        self.config.configuration()
    }

    // Execution log

    pub fn checkpoint(&self) {
        self.log_mut().checkpoint();
    }

    pub fn execution_log(&self) -> Vec<Statement> {
        self.log().all().to_vec()
    }

    pub fn execution_log_since_checkpoint(&self) -> Vec<Statement> {
        self.log().since_last_checkpoint().to_vec()
    }

    /// Whether a statement with `entry_point` was logged since the last
    /// checkpoint.
    pub fn has_executed(&self, entry_point: EntryPoint) -> bool {
        let wanted = Statement::from(entry_point);
        self.log().since_last_checkpoint().iter().any(|s| *s == wanted)
    }

    /// The most recent statement logged with `entry_point`, if any.
    pub fn last_executed(&self, entry_point: EntryPoint) -> Option<Statement> {
        let wanted = Statement::from(entry_point);
        self.log().all().iter().rev().find(|s| **s == wanted).cloned()
    }

    // Statements

    /// Logs an insert and returns the id the row would have been given: the
    /// caller's own id if it supplied one, otherwise the next value of this
    /// connection's counter.
    pub fn insert(&self, sql: &str, id_value: Option<u64>) -> u64 {
        with_entry_point(EntryPoint::Insert, || self.exec_insert(sql, id_value))
    }

    pub fn create(&self, sql: &str, id_value: Option<u64>) -> u64 {
        with_entry_point(EntryPoint::Insert, || self.insert(sql, id_value))
    }

    pub fn update(&self, sql: &str) -> u64 {
        with_entry_point(EntryPoint::Update, || self.exec_update(sql))
    }

    pub fn delete(&self, sql: &str) -> u64 {
        with_entry_point(EntryPoint::Delete, || self.exec_delete(sql))
    }

    pub fn select_all(&self, sql: &str) -> Vec<Row> {
        with_entry_point(EntryPoint::SelectAll, || self.select(sql))
    }

    pub fn select_one(&self, sql: &str) -> Option<Row> {
        with_entry_point(EntryPoint::SelectOne, || self.select_all(sql).into_iter().next())
    }

    pub fn select_value(&self, sql: &str) -> Option<DataValue> {
        with_entry_point(EntryPoint::SelectValue, || {
            self.select_one(sql)
                .and_then(|row| row.into_iter().next())
                .map(|(_, value)| value)
        })
    }

    pub fn select_rows(&self, sql: &str) -> Vec<Vec<DataValue>> {
        with_entry_point(EntryPoint::SelectRows, || self.exec_query(sql).into_rows())
    }

    /// Raw execution. Logged under whatever operation is in flight, or
    /// untagged when called directly.
    pub fn execute(&self, sql: &str) -> NullObject {
        self.record(sql);
        NullObject
    }

    pub fn exec_query(&self, sql: &str) -> QueryResult {
        with_entry_point(EntryPoint::Execute, || {
            self.record(sql);
            QueryResult::empty()
        })
    }

    fn exec_insert(&self, sql: &str, id_value: Option<u64>) -> u64 {
        self.execute(sql);
        id_value.unwrap_or_else(|| self.next_unique_id())
    }

    fn exec_update(&self, sql: &str) -> u64 {
        self.execute(sql).rows_affected()
    }

    fn exec_delete(&self, sql: &str) -> u64 {
        self.execute(sql).rows_affected()
    }

    fn select(&self, sql: &str) -> Vec<Row> {
        self.exec_query(sql).into_named_rows()
    }

    fn record(&self, sql: &str) {
        let statement = Statement::new(entry_point::current(), sql);
        self.log_mut().append(statement);
    }

    fn next_unique_id(&self) -> u64 {
        self.last_unique_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    // Schema

    /// Defines a table. The builder receives the new definition, which
    /// already holds the implicit primary key unless `options.id` is false.
    pub fn create_table<F>(&self, name: &str, options: TableOptions, build: F)
    where
        F: FnOnce(&mut TableDefinition),
    {
        let mut table = TableDefinition::new(name, options);
        build(&mut table);
        self.lock_schema().create_table(table);
    }

    pub fn add_index(&self, table: &str, columns: &[&str], options: IndexOptions) {
        self.lock_schema()
            .add_index(IndexDefinition::new(table, columns, options));
    }

    pub fn add_fk_constraint(&self, table: &str, columns: &[String], references: &str) {
        self.lock_schema().add_fk_constraint(table, columns, references);
    }

    pub fn add_pk_constraint(&self, table: &str, columns: &[String]) {
        self.lock_schema().add_pk_constraint(table, columns);
    }

    pub fn enable_extension(&self, name: &str) {
        debug!("Ignoring extension {}", name);
    }

    /// Column descriptors for `table`, loading the schema definition on first
    /// use. Unknown tables have no columns.
    pub fn columns(&self, table: &str) -> Result<Vec<Column>> {
        let schema = self.loaded_schema()?;
        Ok(schema
            .table(table)
            .map(TableDefinition::column_descriptors)
            .unwrap_or_default())
    }

    pub fn primary_key(&self, table: &str) -> Result<String> {
        self.columns(table)?
            .into_iter()
            .find(Column::is_primary_key)
            .map(|column| column.name)
            .ok_or_else(|| NullDBError::PrimaryKeyNotFound(table.to_string()))
    }

    pub fn tables(&self) -> Result<Vec<String>> {
        Ok(self.loaded_schema()?.table_names())
    }

    pub fn indexes(&self, table: &str) -> Result<Vec<IndexDefinition>> {
        Ok(self.loaded_schema()?.indexes(table))
    }

    pub fn schema_state(&self) -> SchemaState {
        self.lock_schema().state()
    }

    /// The schema lock is held across the load: concurrent first readers wait
    /// for it.
    fn loaded_schema(&self) -> Result<MutexGuard<'_, Schema>> {
        let mut schema = self.lock_schema();
        if schema.state() == SchemaState::Loaded {
            return Ok(schema);
        }
        if !schema.is_pristine() {
            // Tables were defined by hand; there is nothing left to load.
            schema.set_state(SchemaState::Loaded);
            return Ok(schema);
        }

        schema.set_state(SchemaState::Loading);
        let path = self.config.schema_path();
        let mut staged = Schema::new();
        match self.loader.load(&path, &mut staged) {
            Ok(()) => {
                info!(
                    "Loaded schema from {}: {} tables",
                    path.display(),
                    staged.table_names().len()
                );
                staged.set_state(SchemaState::Loaded);
                *schema = staged;
                Ok(schema)
            }
            Err(e) => {
                warn!("Failed to load schema from {}: {}", path.display(), e);
                schema.set_state(SchemaState::NotLoaded);
                Err(e)
            }
        }
    }

    fn log(&self) -> RwLockReadGuard<'_, ExecutionLog> {
        self.execution_log.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn log_mut(&self) -> RwLockWriteGuard<'_, ExecutionLog> {
        self.execution_log.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_schema(&self) -> MutexGuard<'_, Schema> {
        self.schema.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Adapter for NullConnection {
    fn adapter_name(&self) -> &str {
        ADAPTER_NAME
    }

    fn supports_migrations(&self) -> bool {
        true
    }

    fn insert(&self, sql: &str, id_value: Option<u64>) -> Result<u64> {
        Ok(NullConnection::insert(self, sql, id_value))
    }

    fn update(&self, sql: &str) -> Result<u64> {
        Ok(NullConnection::update(self, sql))
    }

    fn delete(&self, sql: &str) -> Result<u64> {
        Ok(NullConnection::delete(self, sql))
    }

    fn select_all(&self, sql: &str) -> Result<Vec<Row>> {
        Ok(NullConnection::select_all(self, sql))
    }

    fn select_one(&self, sql: &str) -> Result<Option<Row>> {
        Ok(NullConnection::select_one(self, sql))
    }

    fn select_value(&self, sql: &str) -> Result<Option<DataValue>> {
        Ok(NullConnection::select_value(self, sql))
    }

    fn select_rows(&self, sql: &str) -> Result<Vec<Vec<DataValue>>> {
        Ok(NullConnection::select_rows(self, sql))
    }

    fn exec_query(&self, sql: &str) -> Result<QueryResult> {
        Ok(NullConnection::exec_query(self, sql))
    }

    fn columns(&self, table: &str) -> Result<Vec<Column>> {
        NullConnection::columns(self, table)
    }

    fn primary_key(&self, table: &str) -> Result<String> {
        NullConnection::primary_key(self, table)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::data_type::DataType;

    fn connection() -> NullConnection {
        NullConnection::default()
    }

    #[test]
    fn test_adapter_identity() {
        let conn = connection();
        assert_eq!(conn.adapter_name(), "NullDB");
        assert!(conn.supports_migrations());
        assert_eq!(
            conn.configuration()["adapter"],
            Value::String("nulldb".to_string())
        );
    }

    #[test]
    fn test_operations_return_empty_results() {
        let conn = connection();
        assert_eq!(conn.update("UPDATE widgets SET name = 'x'"), 0);
        assert_eq!(conn.delete("DELETE FROM widgets"), 0);
        assert!(conn.select_all("SELECT * FROM widgets").is_empty());
        assert_eq!(conn.select_one("SELECT * FROM widgets LIMIT 1"), None);
        assert_eq!(conn.select_value("SELECT COUNT(*) FROM widgets"), None);
        assert!(conn.select_rows("SELECT name FROM widgets").is_empty());
        assert!(conn.exec_query("SELECT 1").is_empty());
        assert_eq!(conn.execute("VACUUM").rows_affected(), 0);
    }

    #[test]
    fn test_each_operation_is_tagged() {
        let conn = connection();
        conn.insert("INSERT", None);
        conn.create("CREATE", None);
        conn.update("UPDATE");
        conn.delete("DELETE");
        conn.select_all("SELECT ALL");
        conn.select_one("SELECT ONE");
        conn.select_value("SELECT VALUE");
        conn.select_rows("SELECT ROWS");
        conn.exec_query("EXEC");
        conn.execute("RAW");

        let logged: Vec<(Option<EntryPoint>, String)> = conn
            .execution_log()
            .iter()
            .map(|s| (s.entry_point(), s.content().to_string()))
            .collect();
        assert_eq!(
            logged,
            vec![
                (Some(EntryPoint::Insert), "INSERT".to_string()),
                (Some(EntryPoint::Insert), "CREATE".to_string()),
                (Some(EntryPoint::Update), "UPDATE".to_string()),
                (Some(EntryPoint::Delete), "DELETE".to_string()),
                (Some(EntryPoint::SelectAll), "SELECT ALL".to_string()),
                (Some(EntryPoint::SelectOne), "SELECT ONE".to_string()),
                (Some(EntryPoint::SelectValue), "SELECT VALUE".to_string()),
                (Some(EntryPoint::SelectRows), "SELECT ROWS".to_string()),
                (Some(EntryPoint::Execute), "EXEC".to_string()),
                (None, "RAW".to_string()),
            ]
        );
    }

    #[test]
    fn test_insert_ids() {
        let conn = connection();
        assert_eq!(conn.insert("INSERT INTO a", None), 1);
        assert_eq!(conn.insert("INSERT INTO a", None), 2);
        assert_eq!(conn.insert("INSERT INTO a", Some(42)), 42);
        assert_eq!(conn.create("INSERT INTO a", None), 3);
    }

    #[test]
    fn test_ids_are_per_connection() {
        let first = connection();
        let second = connection();
        assert_eq!(first.insert("INSERT", None), 1);
        assert_eq!(first.insert("INSERT", None), 2);
        assert_eq!(second.insert("INSERT", None), 1);
    }

    #[test]
    fn test_has_executed_since_checkpoint() {
        let conn = connection();
        conn.insert("INSERT INTO a", None);
        conn.checkpoint();
        assert!(!conn.has_executed(EntryPoint::Insert));

        conn.update("UPDATE a");
        assert!(conn.has_executed(EntryPoint::Update));
        assert!(!conn.has_executed(EntryPoint::Insert));
        assert_eq!(
            conn.last_executed(EntryPoint::Insert).map(|s| s.content().to_string()),
            Some("INSERT INTO a".to_string())
        );
        assert_eq!(conn.last_executed(EntryPoint::Delete), None);
    }

    #[test]
    fn test_create_table_and_columns() -> Result<()> {
        let conn = connection();
        conn.create_table("widgets", TableOptions::default(), |t| {
            t.string("name");
        });

        let columns = conn.columns("widgets")?;
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].data_type, DataType::Integer);
        assert_eq!(columns[0].sql_type, DataType::PrimaryKey);
        assert_eq!(columns[1].name, "name");
        assert_eq!(columns[1].data_type, DataType::String);
        assert_eq!(conn.primary_key("widgets")?, "id");
        assert_eq!(conn.schema_state(), SchemaState::Loaded);
        Ok(())
    }

    #[test]
    fn test_schema_calls_are_not_logged() {
        let conn = connection();
        conn.create_table("widgets", TableOptions::default(), |_| {});
        conn.add_index("widgets", &["id"], IndexOptions::default());
        conn.add_fk_constraint("widgets", &["owner_id".to_string()], "owners");
        conn.add_pk_constraint("widgets", &["id".to_string()]);
        conn.enable_extension("hstore");
        assert!(conn.execution_log().is_empty());
    }

    #[test]
    fn test_as_adapter() -> Result<()> {
        let conn: Arc<dyn Adapter> = Arc::new(connection());
        assert_eq!(conn.adapter_name(), "NullDB");
        assert_eq!(conn.insert("INSERT", None)?, 1);
        assert!(conn.select_all("SELECT")?.is_empty());

        let null = conn.as_any().downcast_ref::<NullConnection>().unwrap();
        assert_eq!(null.execution_log().len(), 2);
        Ok(())
    }
}
