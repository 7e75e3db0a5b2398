pub mod clock;
pub mod database;
pub mod insert_statement;
pub mod postgres_connection;
