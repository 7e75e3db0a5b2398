mod application;
mod domain;
mod error;
mod infrastructure;
mod interfaces;

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use env_logger::Env;
use log::info;

use crate::application::{
    commands::LoaderCommand,
    use_cases::{bulk_insert::BulkInsertUseCase, smoke_test::SmokeTestUseCase},
};
use crate::domain::row_values::PrefixedLabel;
use crate::error::DatabaseError;
use crate::infrastructure::{clock::MonotonicClock, postgres_connection::PostgresConnection};
use crate::interfaces::cli::collect_loader_command;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // The connection is dropped inside `run`, before the process exits.
    if let Err(error) = run() {
        match error.downcast_ref::<DatabaseError>() {
            Some(database_error) => println!(
                "ERROR: {}: {}",
                database_error.step, database_error.message
            ),
            None => println!("ERROR: {error:#}"),
        }
        let _ = io::stdout().flush();
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let command = collect_loader_command()?;
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match command {
        LoaderCommand::BulkInsert(command) => {
            let mut connection = PostgresConnection::connect(&command.database_url)?;
            info!(
                "connected, loading into {} ({})",
                command.table, command.dialect_kind
            );

            println!("{}", style("Loading rows with batched INSERTs...").cyan());
            let generator = PrefixedLabel::new(command.label_prefix.as_str());
            let result = BulkInsertUseCase::new(MonotonicClock::default()).execute(
                &mut connection,
                &command,
                &generator,
                &mut output,
            )?;

            println!(
                "{} {} ({} batches)",
                style("Loaded into").green(),
                style(&command.table).bold(),
                result.batch_count,
            );
        }
        LoaderCommand::SmokeTest(command) => {
            let mut connection = PostgresConnection::connect(&command.database_url)?;
            info!(
                "connected, running smoke test against {} ({})",
                command.table, command.dialect_kind
            );

            let result = SmokeTestUseCase.execute(&mut connection, &command, &mut output)?;
            println!(
                "{} {}",
                style("Rows read back:").green(),
                style(result.rows_read).bold()
            );
        }
    }

    Ok(())
}
