use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupted share code: {0}")]
    CorruptedShareCode(String),

    #[error("No saved week plan; run `plan` first")]
    NoSavedPlan,
}

pub type Result<T> = std::result::Result<T, PlanError>;
