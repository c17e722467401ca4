use stacksheet_engine::engine::CellStore;

/// UI-agnostic document state for one grid.
#[derive(Clone, Debug)]
pub struct Document {
    /// Cell slots plus grid dimensions
    pub store: CellStore,
}

impl Document {
    /// A document with no cells.
    pub fn new() -> Self {
        Document {
            store: CellStore::empty(),
        }
    }

    pub fn from_store(store: CellStore) -> Self {
        Document { store }
    }

    pub fn columns(&self) -> usize {
        self.store.columns()
    }

    pub fn rows(&self) -> usize {
        self.store.rows()
    }

    /// Header line: `"<columns> <rows>"`.
    pub fn header(&self) -> String {
        format!("{} {}", self.columns(), self.rows())
    }

    /// True once every cell holds a final value.
    pub fn is_resolved(&self) -> bool {
        self.store.values().is_some()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
