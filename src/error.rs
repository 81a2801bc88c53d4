use std::path::PathBuf;
use thiserror::Error;

pub type DispatchResult<T> = Result<T, DispatchError>;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input workbook not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Cannot read workbook {}: {reason}", path.display())]
    UnreadableWorkbook { path: PathBuf, reason: String },

    #[error(
        "Worksheets '{first}' and '{second}' both map to {}",
        output.display()
    )]
    NameCollision {
        first: String,
        second: String,
        output: PathBuf,
    },

    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Report error: {0}")]
    Report(String),
}
