//! stacksheet-core - UI-agnostic document model.

pub mod document;
pub mod error;

pub use document::{Document, parse_lines};
pub use error::{Result, StacksheetError};

pub use stacksheet_engine::SheetError;
pub use stacksheet_engine::engine::{CellRef, DEFAULT_PRECISION};
