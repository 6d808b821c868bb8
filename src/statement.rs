use std::fmt;

use serde::{Deserialize, Serialize};

/// The high-level operation a statement was issued from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    Insert,
    Update,
    Delete,
    SelectAll,
    SelectOne,
    SelectValue,
    SelectRows,
    Execute,
    Checkpoint,
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryPoint::Insert => "insert",
            EntryPoint::Update => "update",
            EntryPoint::Delete => "delete",
            EntryPoint::SelectAll => "select_all",
            EntryPoint::SelectOne => "select_one",
            EntryPoint::SelectValue => "select_value",
            EntryPoint::SelectRows => "select_rows",
            EntryPoint::Execute => "execute",
            EntryPoint::Checkpoint => "checkpoint",
        };
        write!(f, "{}", name)
    }
}

/// One intercepted operation, or a checkpoint marker.
///
/// Equality deliberately ignores `content`: two operations are equal when they
/// share an entry point, which lets a lookup by entry point double as "find the
/// last statement with this tag". Checkpoints compare equal only to other
/// checkpoints, whatever tag an operation happens to carry.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub enum Statement {
    Operation {
        entry_point: Option<EntryPoint>,
        content: String,
    },
    Checkpoint,
}

impl Statement {
    pub fn new(entry_point: Option<EntryPoint>, content: impl Into<String>) -> Self {
        Statement::Operation {
            entry_point,
            content: content.into(),
        }
    }

    pub fn checkpoint() -> Self {
        Statement::Checkpoint
    }

    pub fn is_checkpoint(&self) -> bool {
        matches!(self, Statement::Checkpoint)
    }

    pub fn entry_point(&self) -> Option<EntryPoint> {
        match self {
            Statement::Operation { entry_point, .. } => *entry_point,
            Statement::Checkpoint => Some(EntryPoint::Checkpoint),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Statement::Operation { content, .. } => content,
            Statement::Checkpoint => "",
        }
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Statement::Checkpoint, Statement::Checkpoint) => true,
            (Statement::Checkpoint, _) | (_, Statement::Checkpoint) => false,
            (
                Statement::Operation { entry_point: a, .. },
                Statement::Operation { entry_point: b, .. },
            ) => a == b,
        }
    }
}

impl Eq for Statement {}

impl From<EntryPoint> for Statement {
    fn from(entry_point: EntryPoint) -> Self {
        Statement::new(Some(entry_point), "")
    }
}
