use std::slice;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::statement::Statement;

/// Append-only record of every statement a connection intercepted.
///
/// Entries are never reordered or removed. The position of the most recent
/// checkpoint is tracked on append so `since_last_checkpoint` does not need to
/// rescan the log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionLog {
    entries: Vec<Statement>,
    last_checkpoint: Option<usize>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        ExecutionLog::default()
    }

    pub fn append(&mut self, statement: Statement) {
        debug!(
            "Logging statement #{}: entry_point={:?} content={:?}",
            self.entries.len(),
            statement.entry_point(),
            statement.content()
        );
        if statement == Statement::Checkpoint {
            self.last_checkpoint = Some(self.entries.len());
        }
        self.entries.push(statement);
    }

    pub fn checkpoint(&mut self) {
        self.append(Statement::checkpoint());
    }

    pub fn all(&self) -> &[Statement] {
        &self.entries
    }

    pub fn since_last_checkpoint(&self) -> &[Statement] {
        match self.last_checkpoint {
            Some(position) => &self.entries[position + 1..],
            None => &self.entries,
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, Statement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExecutionLog {
    type Item = &'a Statement;
    type IntoIter = slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
