use std::io::Write;

use anyhow::Result;
use log::{debug, info};

use crate::{
    application::commands::{BulkInsertCommand, BulkInsertResult},
    domain::{
        row_batch::RowBatchSlicer, row_values::RowValueGenerator, sql_dialect::SqlDialectKind,
        table::TableName,
    },
    error::{DatabaseError, DatabaseStep, StepContext},
    infrastructure::{
        clock::{Clock, MonotonicClock},
        database::{FieldValue, SqlConnection},
        insert_statement::InsertStatementBuilder,
    },
};

/// Creates the target table unless it already exists.
pub fn ensure_table(
    connection: &mut dyn SqlConnection,
    table: &TableName,
    dialect_kind: SqlDialectKind,
) -> Result<(), DatabaseError> {
    let sql = table.create_if_absent_sql(dialect_kind);
    debug!("{sql}");
    connection
        .execute(&sql)
        .during(DatabaseStep::CreatingTable)?;
    Ok(())
}

pub fn count_rows(
    connection: &mut dyn SqlConnection,
    table: &TableName,
) -> Result<u64, DatabaseError> {
    let rows = connection
        .query(&table.count_rows_sql())
        .during(DatabaseStep::CountingRows)?;
    match rows.first().and_then(|row| row.field(0)) {
        Some(FieldValue::Int(count)) if *count >= 0 => Ok(*count as u64),
        other => Err(DatabaseError::new(
            DatabaseStep::CountingRows,
            format!("unexpected count result: {other:?}"),
        )),
    }
}

#[derive(Debug, Default)]
pub struct BulkInsertUseCase<C = MonotonicClock> {
    clock: C,
}

impl<C: Clock> BulkInsertUseCase<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn execute(
        &self,
        connection: &mut dyn SqlConnection,
        command: &BulkInsertCommand,
        generator: &dyn RowValueGenerator,
        progress: &mut dyn Write,
    ) -> Result<BulkInsertResult> {
        let slicer = RowBatchSlicer::new(command.total_rows, command.batch_size)?;
        let statement_builder = InsertStatementBuilder::new(&command.table);

        ensure_table(connection, &command.table, command.dialect_kind)?;
        let rows_before = if command.verify_row_count {
            Some(count_rows(connection, &command.table)?)
        } else {
            None
        };

        info!(
            "inserting {} rows into {} in {} batches of up to {}",
            slicer.total_rows(),
            command.table,
            slicer.batch_count(),
            slicer.batch_size()
        );

        let started_at = self.clock.now();
        let mut inserted_rows = 0u64;
        let mut batch_count = 0u64;
        for batch in slicer.iter_batches() {
            let statement = statement_builder.render(batch, generator);
            let affected = connection
                .execute(&statement)
                .during(DatabaseStep::InsertingBatch)?;
            if affected != batch.len() {
                return Err(DatabaseError::new(
                    DatabaseStep::InsertingBatch,
                    format!(
                        "engine acknowledged {affected} of {} rows for records {} to {}",
                        batch.len(),
                        batch.first_row,
                        batch.last_row
                    ),
                )
                .into());
            }

            inserted_rows += affected;
            batch_count += 1;
            writeln!(
                progress,
                "Inserted records {} to {}",
                batch.first_row, batch.last_row
            )?;
        }
        let elapsed = self.clock.now().saturating_sub(started_at);

        let row_count_delta = match rows_before {
            Some(before) => {
                let after = count_rows(connection, &command.table)?;
                let delta = after.saturating_sub(before);
                if delta != inserted_rows {
                    return Err(DatabaseError::new(
                        DatabaseStep::CountingRows,
                        format!("row count grew by {delta}, expected {inserted_rows}"),
                    )
                    .into());
                }
                Some(delta)
            }
            None => None,
        };

        let result = BulkInsertResult {
            inserted_rows,
            batch_count,
            elapsed,
            row_count_delta,
        };

        writeln!(
            progress,
            "Successfully inserted {} records in {:.2} seconds using batched INSERTs!",
            result.inserted_rows,
            result.elapsed.as_secs_f64()
        )?;
        match result.rows_per_second() {
            Some(rate) => writeln!(
                progress,
                "Throughput: {rate:.0} rows/s ({} batches)",
                result.batch_count
            )?,
            None => writeln!(
                progress,
                "Throughput: unavailable ({} batches)",
                result.batch_count
            )?,
        }
        if let Some(delta) = result.row_count_delta {
            writeln!(progress, "Verified: table grew by {delta} rows")?;
        }

        Ok(result)
    }
}
