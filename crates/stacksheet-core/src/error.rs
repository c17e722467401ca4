//! Error types for Stacksheet core.

use thiserror::Error;

use stacksheet_engine::SheetError;

/// Errors that can occur while loading, resolving or rendering a grid.
#[derive(Error, Debug)]
pub enum StacksheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("Grid has not been resolved")]
    NotResolved,
}

impl StacksheetError {
    /// The status kind to report to the user.
    ///
    /// Unreadable input is reported as an invalid format.
    pub fn sheet_error(&self) -> SheetError {
        match self {
            StacksheetError::Io(_) => SheetError::InvalidFormat,
            StacksheetError::Sheet(err) => *err,
            StacksheetError::NotResolved => SheetError::InternalError,
        }
    }
}

pub type Result<T> = std::result::Result<T, StacksheetError>;
