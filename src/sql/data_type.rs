use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use nom::{combinator::map, IResult};
use serde::{Deserialize, Serialize};

use super::parser_utils::ident;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    PrimaryKey,
    String,
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Timestamp,
    Other(String),
}

lazy_static! {
    static ref TYPE_NAMES: HashMap<&'static str, DataType> = {
        let mut names = HashMap::new();
        for name in ["INTEGER", "INT", "BIGINT", "SMALLINT", "SERIAL"] {
            names.insert(name, DataType::Integer);
        }
        for name in ["VARCHAR", "CHAR", "CHARACTER", "STRING"] {
            names.insert(name, DataType::String);
        }
        for name in ["FLOAT", "REAL", "DOUBLE", "DECIMAL", "NUMERIC"] {
            names.insert(name, DataType::Float);
        }
        names.insert("TEXT", DataType::Text);
        names.insert("BOOLEAN", DataType::Boolean);
        names.insert("BOOL", DataType::Boolean);
        names.insert("DATE", DataType::Date);
        names.insert("TIMESTAMP", DataType::Timestamp);
        names.insert("DATETIME", DataType::Timestamp);
        names.insert("PRIMARY_KEY", DataType::PrimaryKey);
        names
    };
}

impl DataType {
    pub fn parse(input: &str) -> IResult<&str, DataType> {
        map(ident, DataType::from_name)(input)
    }

    /// Maps a declared type name onto a known type, case-insensitively.
    pub fn from_name(name: &str) -> DataType {
        let upper = name.to_ascii_uppercase();
        match TYPE_NAMES.get(upper.as_str()) {
            Some(data_type) => data_type.clone(),
            None => DataType::Other(upper),
        }
    }

    /// The type a column of this declared type is read back as. A primary
    /// key has no type of its own and reads back as an integer.
    pub fn normalized(&self) -> DataType {
        match self {
            DataType::PrimaryKey => DataType::Integer,
            other => other.clone(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::PrimaryKey => write!(f, "primary_key"),
            DataType::String => write!(f, "string"),
            DataType::Text => write!(f, "text"),
            DataType::Integer => write!(f, "integer"),
            DataType::Float => write!(f, "float"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Other(name) => write!(f, "{}", name.to_ascii_lowercase()),
        }
    }
}
