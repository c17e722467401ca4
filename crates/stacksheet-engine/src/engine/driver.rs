//! Whole-grid resolution.

use tracing::{debug, debug_span, trace};

use super::cell::{CellStore, Slot};
use super::eval::Evaluator;
use crate::error::{Result, SheetError};

/// Resolve every cell of `store` in row-major order.
///
/// Stops at the first error and leaves the remaining cells as they are.
/// Cells already resolved (for example as the target of an earlier
/// reference) are kept.
pub fn resolve_all(store: &mut CellStore) -> Result<()> {
    let _span = debug_span!("resolve_all", cells = store.len()).entered();

    for index in 0..store.len() {
        let text = match store.get(index) {
            Some(Slot::Unresolved(text)) => text.clone(),
            Some(Slot::Resolved(value)) if !value.is_finite() => {
                debug!(index, "cached value is not a number");
                return Err(SheetError::InternalError);
            }
            Some(Slot::Resolved(_)) => continue,
            Some(Slot::InProgress) | None => {
                debug!(index, "cell left in progress outside a resolution path");
                return Err(SheetError::InternalError);
            }
        };
        let value = Evaluator::new(store).resolve(Some(index), &text)?;
        store.set_resolved(index, value);
        trace!(index, value, "cell resolved");
    }

    debug!("grid resolved");
    Ok(())
}
