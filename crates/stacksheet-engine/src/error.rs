//! Error kinds for a resolution session.

use thiserror::Error;

/// Reasons a grid cannot be constructed or resolved.
///
/// The first error raised ends the session. The `Display` text is the
/// message shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetError {
    #[error("Input data is in an invalid format.")]
    InvalidFormat,

    /// Never produced: short or long entry lists report [`SheetError::InvalidFormat`].
    #[error("Input data has lacking entries.")]
    LackingEntries,

    /// Never produced: short or long entry lists report [`SheetError::InvalidFormat`].
    #[error("Input data has extra entries.")]
    ExtraEntries,

    #[error("Input data has circular references.")]
    CircularReference,

    #[error("Input data has an invalid expression.")]
    InvalidExpression,

    #[error("Input data has an invalid reference.")]
    InvalidReference,

    #[error("An internal error occurred.")]
    InternalError,
}

pub type Result<T> = std::result::Result<T, SheetError>;
