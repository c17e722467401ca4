//! stacksheet_engine - Postfix cell resolution engine.

pub mod engine;
pub mod error;

pub use error::{Result, SheetError};
