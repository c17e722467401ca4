use super::Document;
use crate::error::Result;
use stacksheet_engine::engine::{Evaluator, resolve_all};
use tracing::debug;

impl Document {
    /// Run a resolution session over every cell.
    ///
    /// On error the first failing kind is returned and the grid is left part
    /// way resolved; it must not be rendered.
    pub fn resolve_all(&mut self) -> Result<()> {
        resolve_all(&mut self.store).inspect_err(|err| {
            debug!(columns = self.store.columns(), rows = self.store.rows(), %err, "resolution failed");
        })?;
        Ok(())
    }

    /// Evaluate one piece of cell text against this grid without storing it.
    ///
    /// References it follows are resolved and cached like in a full session.
    pub fn evaluate(&mut self, text: &str) -> Result<f64> {
        Ok(Evaluator::new(&mut self.store).resolve(None, text.trim())?)
    }
}
