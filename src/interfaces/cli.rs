use std::env;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use crate::{
    application::commands::{BulkInsertCommand, LoaderCommand, SmokeTestCommand},
    domain::{sql_dialect::SqlDialectKind, table::TableName},
};

const DEFAULT_DATABASE_URL: &str = "postgresql://root@localhost:26257/defaultdb?sslmode=disable";
const DEFAULT_TABLE: &str = "test_table";
const DEFAULT_TOTAL_ROWS: u64 = 10_000_000;
const DEFAULT_BATCH_SIZE: u64 = 1_000;
const DEFAULT_LABEL_PREFIX: &str = "User_";

#[derive(Debug, Parser)]
#[command(
    name = "crdb-loader",
    version,
    about = "Create a table in CockroachDB and fill it with batched multi-row INSERTs"
)]
struct CliArgs {
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = DEFAULT_DATABASE_URL,
        help = "Connection string of the target database"
    )]
    database_url: String,
    #[arg(long, short = 't', global = true, default_value = DEFAULT_TABLE)]
    table: String,
    #[arg(
        long,
        short = 'd',
        global = true,
        default_value = "cockroach",
        help = "Target engine: cockroach or postgres"
    )]
    dialect: SqlDialectKind,
    #[command(subcommand)]
    action: CliAction,
}

#[derive(Debug, Subcommand)]
enum CliAction {
    /// Insert generated rows in batches and report throughput
    Load {
        #[arg(long, short = 'n', default_value_t = DEFAULT_TOTAL_ROWS)]
        total_rows: u64,
        #[arg(long, short = 'b', default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: u64,
        #[arg(long, short = 'p', default_value = DEFAULT_LABEL_PREFIX)]
        label_prefix: String,
        #[arg(long, help = "Compare table row counts before and after the load")]
        verify: bool,
    },
    /// Insert three sample rows and print the table contents
    Smoke,
}

pub fn collect_loader_command() -> Result<LoaderCommand> {
    if env::args_os().len() == 1 {
        return collect_interactive_command();
    }
    collect_command_from_args(CliArgs::parse())
}

fn collect_command_from_args(args: CliArgs) -> Result<LoaderCommand> {
    let database_url = ensure_non_empty_value(args.database_url, "Database URL")?;
    let table = TableName::parse(&args.table)?;
    let dialect_kind = args.dialect;

    match args.action {
        CliAction::Load {
            total_rows,
            batch_size,
            label_prefix,
            verify,
        } => Ok(LoaderCommand::BulkInsert(BulkInsertCommand {
            database_url,
            table,
            dialect_kind,
            total_rows: ensure_positive(total_rows, "--total-rows")?,
            batch_size: ensure_positive(batch_size, "--batch-size")?,
            label_prefix,
            verify_row_count: verify,
        })),
        CliAction::Smoke => Ok(LoaderCommand::SmokeTest(SmokeTestCommand {
            database_url,
            table,
            dialect_kind,
        })),
    }
}

fn collect_interactive_command() -> Result<LoaderCommand> {
    let theme = ColorfulTheme::default();

    println!();
    println!(
        "{}",
        style(" CRDB BULK LOADER ")
            .black()
            .on_cyan()
            .bold()
            .underlined()
    );
    println!("{}", style("Fill a table with batched INSERT statements").dim());
    println!();

    let actions = ["Bulk load generated rows", "Run smoke test"];
    let action_index = Select::with_theme(&theme)
        .with_prompt("Action")
        .default(0)
        .items(&actions)
        .interact()?;

    let database_url: String = Input::with_theme(&theme)
        .with_prompt("Database URL")
        .default(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        )
        .interact_text()?;

    let table_name: String = Input::with_theme(&theme)
        .with_prompt("Target table")
        .default(DEFAULT_TABLE.to_string())
        .validate_with(|value: &String| {
            TableName::parse(value)
                .map(|_| ())
                .map_err(|error| error.to_string())
        })
        .interact_text()?;
    let table = TableName::parse(&table_name)?;

    let selected_dialect_index = Select::with_theme(&theme)
        .with_prompt("SQL dialect")
        .default(0)
        .items(&SqlDialectKind::ALL)
        .interact()?;
    let dialect_kind = SqlDialectKind::ALL[selected_dialect_index];

    if action_index == 1 {
        return Ok(LoaderCommand::SmokeTest(SmokeTestCommand {
            database_url: database_url.trim().to_string(),
            table,
            dialect_kind,
        }));
    }

    let total_rows: u64 = Input::with_theme(&theme)
        .with_prompt("Total rows")
        .default(DEFAULT_TOTAL_ROWS)
        .validate_with(|value: &u64| {
            if *value == 0 {
                Err("Total rows must be greater than 0")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let batch_size: u64 = Input::with_theme(&theme)
        .with_prompt("Batch size")
        .default(DEFAULT_BATCH_SIZE)
        .validate_with(|value: &u64| {
            if *value == 0 {
                Err("Batch size must be greater than 0")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let label_prefix: String = Input::with_theme(&theme)
        .with_prompt("Row label prefix")
        .default(DEFAULT_LABEL_PREFIX.to_string())
        .interact_text()?;

    let verify_row_count = Confirm::with_theme(&theme)
        .with_prompt("Verify row count after loading?")
        .default(false)
        .interact()?;

    Ok(LoaderCommand::BulkInsert(BulkInsertCommand {
        database_url: database_url.trim().to_string(),
        table,
        dialect_kind,
        total_rows,
        batch_size,
        label_prefix,
        verify_row_count,
    }))
}

fn ensure_positive(value: u64, flag: &str) -> Result<u64> {
    if value == 0 {
        return Err(anyhow!("{flag} must be greater than 0"));
    }
    Ok(value)
}

fn ensure_non_empty_value(value: String, field_name: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field_name} must not be empty"));
    }
    Ok(value)
}
