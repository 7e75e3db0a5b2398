use log::debug;
use postgres::{Client, NoTls, Row, SimpleQueryMessage, types::Type};

use crate::{
    error::{DatabaseError, DatabaseStep, DriverError},
    infrastructure::database::{FieldValue, ResultRow, SqlConnection},
};

/// Synchronous PostgreSQL-protocol connection, usable against CockroachDB.
pub struct PostgresConnection {
    client: Client,
}

impl PostgresConnection {
    pub fn connect(database_url: &str) -> Result<Self, DatabaseError> {
        debug!("connecting to {}", redact_password(database_url));
        let client = Client::connect(database_url, NoTls)
            .map_err(|error| DatabaseError::new(DatabaseStep::Connecting, diagnostic(&error)))?;
        Ok(Self { client })
    }
}

impl SqlConnection for PostgresConnection {
    /// Sends `sql` as one simple-protocol Query message, so the server parses
    /// and runs it in a single round trip without preparing it.
    fn execute(&mut self, sql: &str) -> Result<u64, DriverError> {
        debug!("executing statement of {} bytes", sql.len());
        let messages = self
            .client
            .simple_query(sql)
            .map_err(|error| DriverError(diagnostic(&error)))?;
        Ok(messages
            .iter()
            .filter_map(|message| match message {
                SimpleQueryMessage::CommandComplete(rows) => Some(*rows),
                _ => None,
            })
            .sum())
    }

    fn query(&mut self, sql: &str) -> Result<Vec<ResultRow>, DriverError> {
        debug!("querying: {sql}");
        let rows = self
            .client
            .query(sql, &[])
            .map_err(|error| DriverError(diagnostic(&error)))?;
        rows.iter()
            .map(convert_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| DriverError(diagnostic(&error)))
    }
}

impl Drop for PostgresConnection {
    fn drop(&mut self) {
        debug!("disconnecting");
    }
}

fn convert_row(row: &Row) -> Result<ResultRow, postgres::Error> {
    let fields = (0..row.len())
        .map(|index| field_value(row, index))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ResultRow::new(fields))
}

fn field_value(row: &Row, index: usize) -> Result<FieldValue, postgres::Error> {
    let column_type = row.columns()[index].type_();
    let value = if *column_type == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)?
            .map(|value| FieldValue::Int(value.into()))
    } else if *column_type == Type::INT4 {
        row.try_get::<_, Option<i32>>(index)?
            .map(|value| FieldValue::Int(value.into()))
    } else if *column_type == Type::INT8 {
        row.try_get::<_, Option<i64>>(index)?.map(FieldValue::Int)
    } else {
        row.try_get::<_, Option<String>>(index)?.map(FieldValue::Text)
    };
    Ok(value.unwrap_or(FieldValue::Null))
}

/// Prefers the engine's own message over the driver's wrapper text.
fn diagnostic(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!("{} (SQLSTATE {})", db_error.message(), db_error.code().code()),
        None => error.to_string(),
    }
}

fn redact_password(database_url: &str) -> String {
    let Some((scheme, rest)) = database_url.split_once("://") else {
        return redact_keyword_password(database_url);
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return database_url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => database_url.to_string(),
    }
}

fn redact_keyword_password(config: &str) -> String {
    config
        .split_whitespace()
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key.eq_ignore_ascii_case("password") => format!("{key}=***"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
