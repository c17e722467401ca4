//! Cell storage for the grid.
//!
//! - [`Slot`] - The state of one grid position during a resolution session
//! - [`CellStore`] - Dense row-major arena of slots plus the grid dimensions

use super::cell_ref::CellRef;
use super::format::{DEFAULT_PRECISION, format_number};

/// The state of a single cell slot.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    /// Source text as supplied: a literal, a reference, or a postfix expression.
    Unresolved(String),
    /// On the active resolution path. Reaching it again means a cycle.
    InProgress,
    /// Final value as it prints at [`DEFAULT_PRECISION`], cached for the
    /// rest of the session.
    Resolved(f64),
}

/// Row-major storage for every cell of a `columns` x `rows` grid.
#[derive(Clone, Debug)]
pub struct CellStore {
    columns: usize,
    rows: usize,
    slots: Vec<Slot>,
}

impl CellStore {
    /// Build a store from source texts in row-major order.
    /// Returns None unless `entries` holds exactly `columns * rows` texts.
    pub fn new(columns: usize, rows: usize, entries: Vec<String>) -> Option<CellStore> {
        if columns.checked_mul(rows)? != entries.len() {
            return None;
        }
        Some(CellStore {
            columns,
            rows,
            slots: entries.into_iter().map(Slot::Unresolved).collect(),
        })
    }

    /// A grid with no cells. Every reference is out of bounds.
    pub fn empty() -> CellStore {
        CellStore {
            columns: 0,
            rows: 0,
            slots: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Flat index of `cell_ref`, if it lands inside the grid.
    pub fn index_of(&self, cell_ref: &CellRef) -> Option<usize> {
        cell_ref
            .flat_index(self.columns)
            .filter(|&index| index < self.slots.len())
    }

    pub(crate) fn mark_in_progress(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::InProgress;
        }
    }

    /// Cache `value` in its printed form, so later references read the
    /// rounded number. `Infinity` and `NaN` are kept as they are.
    pub(crate) fn set_resolved(&mut self, index: usize, value: f64) {
        let cached = if value.is_finite() {
            format_number(value, DEFAULT_PRECISION)
                .parse()
                .unwrap_or(value)
        } else {
            value
        };
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Resolved(cached);
        }
    }

    /// All values in row-major order, or None while any cell is unresolved.
    pub fn values(&self) -> Option<Vec<f64>> {
        self.iter()
            .map(|slot| match slot {
                Slot::Resolved(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_requires_exact_entry_count() {
        assert!(CellStore::new(2, 2, entries(&["1", "2", "3"])).is_none());
        assert!(CellStore::new(2, 2, entries(&["1", "2", "3", "4", "5"])).is_none());
        let store = CellStore::new(2, 2, entries(&["1", "2", "3", "4"])).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.columns(), 2);
        assert_eq!(store.rows(), 2);
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        assert!(CellStore::new(usize::MAX, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_index_of_bounds() {
        let store = CellStore::new(3, 2, entries(&["1"; 6])).unwrap();
        assert_eq!(store.index_of(&CellRef::new(1, 2)), Some(5));
        assert_eq!(store.index_of(&CellRef::new(2, 0)), None);
        // Column past the row end spills into the next row.
        assert_eq!(store.index_of(&CellRef::new(0, 4)), Some(4));
    }

    #[test]
    fn test_values_only_when_fully_resolved() {
        let mut store = CellStore::new(2, 1, entries(&["1", "2"])).unwrap();
        assert!(store.values().is_none());
        store.set_resolved(0, 1.0);
        store.mark_in_progress(1);
        assert!(store.values().is_none());
        store.set_resolved(1, 2.0);
        assert_eq!(store.values(), Some(vec![1.0, 2.0]));
    }

    #[test]
    fn test_resolved_values_are_cached_rounded() {
        let mut store = CellStore::new(3, 1, entries(&["1", "2", "3"])).unwrap();
        store.set_resolved(0, 1.0 / 3.0);
        store.set_resolved(1, 2.0 / 3.0);
        store.set_resolved(2, f64::INFINITY);
        assert_eq!(store.get(0), Some(&Slot::Resolved(0.333333)));
        assert_eq!(store.get(1), Some(&Slot::Resolved(0.666667)));
        assert_eq!(store.get(2), Some(&Slot::Resolved(f64::INFINITY)));
    }
}
