//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod state;

pub use io::parse_lines;
pub use state::Document;
