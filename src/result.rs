use crate::sql::data_value::DataValue;

/// A result row as `(column, value)` pairs in select-list order.
pub type Row = Vec<(String, DataValue)>;

/// The answer to `exec_query`: no columns, no rows.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Vec<DataValue>>,
}

impl QueryResult {
    pub fn empty() -> Self {
        QueryResult::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<DataValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Vec<DataValue>> {
        self.rows
    }

    /// Rows paired with their column names.
    pub fn into_named_rows(self) -> Vec<Row> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }
}

/// What a raw `execute` hands back.
///
/// An ORM pokes at an execution result in a handful of ways (counting rows,
/// fetching, iterating, freeing). Every one of them answers with nothing here,
/// and `call` absorbs anything else by name.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct NullObject;

impl NullObject {
    pub fn rows_affected(&self) -> u64 {
        0
    }

    pub fn num_rows(&self) -> usize {
        0
    }

    pub fn fields(&self) -> Vec<String> {
        Vec::new()
    }

    pub fn fetch_row(&mut self) -> Option<Vec<DataValue>> {
        None
    }

    pub fn values(&self) -> Vec<Vec<DataValue>> {
        Vec::new()
    }

    pub fn clear(&mut self) {}

    pub fn close(self) {}

    pub fn call(&self, _method: &str) -> Option<DataValue> {
        None
    }
}

impl Iterator for NullObject {
    type Item = Vec<DataValue>;

    fn next(&mut self) -> Option<Self::Item> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_object_absorbs_calls() {
        let mut result = NullObject;
        assert_eq!(result.rows_affected(), 0);
        assert_eq!(result.num_rows(), 0);
        assert!(result.fields().is_empty());
        assert!(result.values().is_empty());
        assert_eq!(result.fetch_row(), None);
        assert_eq!(result.call("cmd_tuples"), None);
        assert_eq!(result.call("anything_at_all"), None);
        result.clear();
        assert_eq!(result.next(), None);
        result.close();
    }

    #[test]
    fn test_empty_query_result() {
        let result = QueryResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert!(result.columns().is_empty());
        assert!(result.clone().into_named_rows().is_empty());
        assert!(result.into_rows().is_empty());
    }
}
