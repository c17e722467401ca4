//! Spreadsheet engine API.
//!
//! This module provides the resolution engine for the grid:
//!
//! - [`CellRef`] - Reference parsing (row letters + column number ↔ indices)
//! - [`Slot`], [`CellStore`] - Row-major cell storage with resolution state
//! - [`Term`], [`Operator`] - Classification of cell text and postfix tokens
//! - [`Evaluator`] - Literal/reference/postfix evaluation with cycle detection
//! - [`resolve_all`] - Resolve a whole grid, stopping at the first error
//! - [`format_number`] - Format values for output

mod cell;
mod cell_ref;
mod driver;
mod eval;
mod format;
mod token;

pub use cell::{CellStore, Slot};
pub use cell_ref::CellRef;
pub use driver::resolve_all;
pub use eval::Evaluator;
pub use format::{DEFAULT_PRECISION, format_number};
pub use token::{Operator, Term};
