use sqlparser::ast::Value;

use crate::domain::{row_batch::RowBatch, row_values::RowValueGenerator, table::TableName};

const VALUE_COLUMN: &str = "name";
// `('` + `')` + `, `, plus slack for doubled quotes.
const PER_ROW_OVERHEAD: usize = 8;
// Larger statements still grow on demand, past this reservation.
const MAX_RESERVED_CAPACITY: usize = 64 * 1024 * 1024;

/// Renders one multi-row INSERT per batch into a growable buffer.
#[derive(Debug, Clone)]
pub struct InsertStatementBuilder {
    prefix: String,
}

impl InsertStatementBuilder {
    pub fn new(table: &TableName) -> Self {
        Self {
            prefix: format!("INSERT INTO {table} ({VALUE_COLUMN}) VALUES "),
        }
    }

    pub fn render(&self, batch: RowBatch, generator: &dyn RowValueGenerator) -> String {
        let per_row = generator
            .value_len_hint(batch.last_row)
            .saturating_add(PER_ROW_OVERHEAD);
        let capacity = usize::try_from(batch.len())
            .unwrap_or(usize::MAX)
            .saturating_mul(per_row)
            .saturating_add(self.prefix.len() + 1)
            .min(MAX_RESERVED_CAPACITY);

        let mut statement = String::with_capacity(capacity);
        statement.push_str(&self.prefix);
        for (position, row_number) in batch.row_numbers().enumerate() {
            if position > 0 {
                statement.push_str(", ");
            }
            let literal = Value::SingleQuotedString(generator.value_for(row_number));
            statement.push('(');
            statement.push_str(&literal.to_string());
            statement.push(')');
        }
        statement.push(';');
        statement
    }

    /// Renders literal values that are not tied to row numbers.
    pub fn render_values(&self, values: &[&str]) -> String {
        let mut statement = self.prefix.clone();
        let tuples = values
            .iter()
            .map(|value| format!("({})", Value::SingleQuotedString((*value).to_string())))
            .collect::<Vec<_>>();
        statement.push_str(&tuples.join(", "));
        statement.push(';');
        statement
    }
}
