use std::fmt;

/// Step of a run that talks to the database, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStep {
    Connecting,
    CreatingTable,
    InsertingBatch,
    InsertingData,
    SelectingData,
    CountingRows,
}

impl DatabaseStep {
    pub fn label(self) -> &'static str {
        match self {
            DatabaseStep::Connecting => "Connecting to database",
            DatabaseStep::CreatingTable => "Creating table",
            DatabaseStep::InsertingBatch => "Inserting batch",
            DatabaseStep::InsertingData => "Inserting data",
            DatabaseStep::SelectingData => "Selecting data",
            DatabaseStep::CountingRows => "Counting rows",
        }
    }
}

impl fmt::Display for DatabaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Diagnostic text reported by the driver or the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DriverError(pub String);

/// A failed database operation. Every one of these ends the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{step}: {message}")]
pub struct DatabaseError {
    pub step: DatabaseStep,
    pub message: String,
}

impl DatabaseError {
    pub fn new(step: DatabaseStep, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
        }
    }
}

pub trait StepContext<T> {
    fn during(self, step: DatabaseStep) -> Result<T, DatabaseError>;
}

impl<T> StepContext<T> for Result<T, DriverError> {
    fn during(self, step: DatabaseStep) -> Result<T, DatabaseError> {
        self.map_err(|error| DatabaseError::new(step, error.0))
    }
}
