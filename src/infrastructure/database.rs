use std::fmt;

use crate::error::DriverError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Int(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("NULL"),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultRow {
    fields: Vec<FieldValue>,
}

impl ResultRow {
    pub fn new(fields: Vec<FieldValue>) -> Self {
        Self { fields }
    }

    pub fn field(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index)
    }
}

/// An open, exclusively owned connection. Dropping it disconnects.
pub trait SqlConnection {
    /// Runs one statement in a single round trip and returns the number of
    /// rows it affected.
    fn execute(&mut self, sql: &str) -> Result<u64, DriverError>;

    /// Runs one query and fetches every result row.
    fn query(&mut self, sql: &str) -> Result<Vec<ResultRow>, DriverError>;
}
