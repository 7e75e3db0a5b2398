use std::time::Duration;

use crate::domain::{sql_dialect::SqlDialectKind, table::TableName};

#[derive(Debug, Clone)]
pub struct BulkInsertCommand {
    pub database_url: String,
    pub table: TableName,
    pub dialect_kind: SqlDialectKind,
    pub total_rows: u64,
    pub batch_size: u64,
    pub label_prefix: String,
    pub verify_row_count: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkInsertResult {
    pub inserted_rows: u64,
    pub batch_count: u64,
    pub elapsed: Duration,
    pub row_count_delta: Option<u64>,
}

impl BulkInsertResult {
    pub fn rows_per_second(&self) -> Option<f64> {
        let seconds = self.elapsed.as_secs_f64();
        (seconds > 0.0).then(|| self.inserted_rows as f64 / seconds)
    }
}

#[derive(Debug, Clone)]
pub struct SmokeTestCommand {
    pub database_url: String,
    pub table: TableName,
    pub dialect_kind: SqlDialectKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeTestResult {
    pub rows_read: usize,
}

#[derive(Debug, Clone)]
pub enum LoaderCommand {
    BulkInsert(BulkInsertCommand),
    SmokeTest(SmokeTestCommand),
}
