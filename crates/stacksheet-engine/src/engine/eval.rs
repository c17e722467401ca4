//! Cell text evaluation.
//!
//! Text is classified as a literal, a reference, or a postfix expression
//! (see [`Term`]). References are followed into the [`CellStore`], and
//! every value computed for a slot is written back so later lookups are
//! O(1). A slot is marked [`Slot::InProgress`] while it sits on the active
//! path; meeting such a slot again is a circular reference.
//!
//! Evaluation runs on an explicit stack of [`Frame`]s instead of native
//! recursion, so long reference chains cannot exhaust the thread stack.

use tracing::debug;

use super::cell::{CellStore, Slot};
use super::cell_ref::CellRef;
use super::token::{Operator, Term};
use crate::error::{Result, SheetError};

/// A reference hop into a cell that was still unresolved. When the chain's
/// value is known it is written into `source` and, if present, `target`.
#[derive(Debug)]
struct Link {
    source: usize,
    target: Option<usize>,
}

/// A postfix expression part way through evaluation.
#[derive(Debug)]
struct Frame {
    target: Option<usize>,
    text: String,
    tokens: Vec<String>,
    next: usize,
    values: Vec<f64>,
    /// Hops that led to this expression, applied once it has a value.
    links: Vec<Link>,
}

/// Resolves cell text against a [`CellStore`].
pub struct Evaluator<'a> {
    store: &'a mut CellStore,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a mut CellStore) -> Evaluator<'a> {
        Evaluator { store }
    }

    /// Compute the value of `text`.
    ///
    /// `target` is the slot the text belongs to, if any; it is marked in
    /// progress while a reference or expression is followed and receives the
    /// result. Operand tokens inside an expression are resolved without a
    /// target.
    pub fn resolve(&mut self, target: Option<usize>, text: &str) -> Result<f64> {
        let mut frames: Vec<Frame> = Vec::new();
        let mut carry = self.enter(target, text, &mut frames)?;

        while let Some(frame) = frames.last_mut() {
            if let Some(value) = carry.take() {
                frame.values.push(value);
            }

            let Some(token) = frame.tokens.get(frame.next) else {
                if let Some(done) = frames.pop() {
                    carry = Some(self.finish(done)?);
                }
                continue;
            };
            frame.next += 1;

            if let Some(op) = Operator::parse(token) {
                if !op.apply(&mut frame.values) {
                    debug!(expression = %frame.text, token = %token, "not enough operands");
                    return Err(SheetError::InvalidExpression);
                }
            } else if *token == frame.text {
                debug!(expression = %frame.text, "token re-parses to its own expression");
                return Err(SheetError::InternalError);
            } else {
                let token = token.clone();
                carry = self.enter(None, &token, &mut frames)?;
            }
        }

        carry.ok_or(SheetError::InternalError)
    }

    /// Follow `text` until it yields a value or an expression.
    ///
    /// Returns the value when it is known right away. Otherwise a [`Frame`]
    /// has been pushed and its result arrives later.
    fn enter(
        &mut self,
        target: Option<usize>,
        text: &str,
        frames: &mut Vec<Frame>,
    ) -> Result<Option<f64>> {
        let mut links: Vec<Link> = Vec::new();
        let mut target = target;
        let mut text = text.to_string();

        loop {
            match Term::classify(&text) {
                Term::Literal(value) => {
                    self.write_back(&links, value);
                    return Ok(Some(value));
                }
                Term::Reference(name) => {
                    let index = self.locate(name)?;
                    match self.store.get(index) {
                        Some(Slot::InProgress) => {
                            debug!(reference = name, index, "circular reference");
                            return Err(SheetError::CircularReference);
                        }
                        Some(Slot::Resolved(value)) if !value.is_finite() => {
                            debug!(reference = name, index, "cached value is not a number");
                            return Err(SheetError::InternalError);
                        }
                        Some(Slot::Resolved(value)) => {
                            let value = *value;
                            if let Some(target) = target {
                                self.store.set_resolved(target, value);
                            }
                            self.write_back(&links, value);
                            return Ok(Some(value));
                        }
                        Some(Slot::Unresolved(source)) => {
                            let source = source.clone();
                            if let Some(target) = target {
                                self.store.mark_in_progress(target);
                            }
                            links.push(Link {
                                source: index,
                                target,
                            });
                            target = Some(index);
                            text = source;
                        }
                        None => return Err(SheetError::InvalidReference),
                    }
                }
                Term::Expression(expr) => {
                    if let Some(target) = target {
                        self.store.mark_in_progress(target);
                    }
                    let tokens = expr.split_whitespace().map(str::to_string).collect();
                    frames.push(Frame {
                        target,
                        text,
                        tokens,
                        next: 0,
                        values: Vec::new(),
                        links,
                    });
                    return Ok(None);
                }
            }
        }
    }

    /// Decode a reference and check it lies inside the grid.
    fn locate(&self, name: &str) -> Result<usize> {
        CellRef::from_str(name)
            .and_then(|cell_ref| self.store.index_of(&cell_ref))
            .ok_or_else(|| {
                debug!(reference = name, cells = self.store.len(), "reference outside grid");
                SheetError::InvalidReference
            })
    }

    fn finish(&mut self, frame: Frame) -> Result<f64> {
        let [value] = frame.values[..] else {
            debug!(
                expression = %frame.text,
                remaining = frame.values.len(),
                "expression must leave exactly one value"
            );
            return Err(SheetError::InvalidExpression);
        };
        if let Some(target) = frame.target {
            self.store.set_resolved(target, value);
        }
        self.write_back(&frame.links, value);
        Ok(value)
    }

    fn write_back(&mut self, links: &[Link], value: f64) {
        for link in links.iter().rev() {
            self.store.set_resolved(link.source, value);
            if let Some(target) = link.target {
                self.store.set_resolved(target, value);
            }
        }
    }
}
