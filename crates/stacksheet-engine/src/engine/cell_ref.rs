//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between textual cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//! Unlike most spreadsheets, the letters name the **row** and the digits
//! name the **column**.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("B3").unwrap();
//! assert_eq!(cell.row, 1);  // 0-indexed
//! assert_eq!(cell.col, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Matches a whole token shaped like a reference: uppercase letters then digits.
pub(crate) fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[0-9]+)$").unwrap())
}

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference (e.g., "A1", "B2", "AA10").
    /// Returns None if the input is invalid, names column 0, or overflows.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse(name)
    }

    fn parse(name: &str) -> Option<CellRef> {
        let caps = reference_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut row_acc = 0usize;
        for c in letters.bytes() {
            let digit = (c - b'A') as usize + 1;
            row_acc = row_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let row = row_acc.checked_sub(1)?;

        let col = numbers.parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(row, col))
    }

    /// Row-major storage index in a grid `columns` wide.
    ///
    /// The column is not checked against `columns`: a column past the end of
    /// a row addresses the following row, as the flat formula dictates.
    pub fn flat_index(&self, columns: usize) -> Option<usize> {
        self.row.checked_mul(columns)?.checked_add(self.col)
    }

    /// Inverse of [`CellRef::flat_index`] for in-row columns.
    pub fn from_flat_index(index: usize, columns: usize) -> Option<CellRef> {
        if columns == 0 {
            return None;
        }
        Some(CellRef::new(index / columns, index % columns))
    }

    /// Convert row index to letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn row_to_letters(row: usize) -> String {
        let mut result = String::new();
        let mut n = row as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::row_to_letters(self.row), self.col + 1)
    }
}
