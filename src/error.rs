use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Date out of range: {0} shifted by {1} days")]
    DateOutOfRange(String, i64),

    #[error("Topic catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate topic id in catalog: {0}")]
    DuplicateTopic(String),

    #[error("Invalid answer '{0}'. Use <question>=<option>, e.g. 0=2")]
    InvalidAnswer(String),

    #[error("Unsupported shell: {0}")]
    UnsupportedShell(String),
}
