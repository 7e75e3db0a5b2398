pub mod row_batch;
pub mod row_values;
pub mod sql_dialect;
pub mod table;
