//! Positional cursor over a filtered list.
//!
//! A cursor sits *between* elements, like a text caret. `next` and
//! `previous` step over one element and make it the current element;
//! `set` and `remove` act on the current element; `add` inserts at the
//! caret.

use crate::container::ListContainer;
use crate::error::{Result, ViewError};
use crate::rule::Rule;

/// Positional cursor whose writes are checked against the list's rule.
///
/// `add` and `set` silently do nothing when the rule rejects the element.
/// Navigation and `remove` pass straight through to the list.
pub struct RestrainedCursor<'a, L: ?Sized, R: ?Sized> {
    list: &'a mut L,
    rule: &'a R,
    position: usize,
    current: Option<usize>,
}

impl<'a, L, R> RestrainedCursor<'a, L, R>
where
    L: ListContainer + ?Sized,
    R: Rule<L::Item> + ?Sized,
{
    /// Callers guarantee `position <= list.len()`.
    pub(crate) fn new(list: &'a mut L, rule: &'a R, position: usize) -> Self {
        debug_assert!(position <= list.len());
        Self {
            list,
            rule,
            position,
            current: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.position < self.list.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Index of the element `next` would return
    pub fn next_index(&self) -> usize {
        self.position
    }

    /// Index of the element `previous` would return, `None` at the front
    pub fn previous_index(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    /// Step forward over one element and return it.
    // Lends from the list, so this cannot be `Iterator::next`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&L::Item> {
        if !self.has_next() {
            return None;
        }
        let index = self.position;
        self.position += 1;
        self.current = Some(index);
        self.list.get(index)
    }

    /// Step backward over one element and return it.
    pub fn previous(&mut self) -> Option<&L::Item> {
        if !self.has_previous() {
            return None;
        }
        self.position -= 1;
        self.current = Some(self.position);
        self.list.get(self.position)
    }

    /// Remove the current element.
    ///
    /// # Errors
    /// `ViewError::NoCurrentElement` if neither `next` nor `previous` has
    /// been called since the last `add` or `remove`.
    pub fn remove(&mut self) -> Result<L::Item> {
        let index = self.current.take().ok_or(ViewError::NoCurrentElement)?;
        let len = self.list.len();
        let removed = self
            .list
            .remove_at(index)
            .ok_or(ViewError::IndexOutOfBounds { index, len })?;
        if index < self.position {
            self.position -= 1;
        }
        Ok(removed)
    }

    /// Replace the current element.
    ///
    /// # Returns
    /// * `Ok(false)` - the rule rejected `item`; nothing changed
    /// * `Ok(true)` - the current element was replaced
    ///
    /// # Errors
    /// `ViewError::NoCurrentElement` when there is no current element.
    pub fn set(&mut self, item: L::Item) -> Result<bool> {
        if !self.rule.accept(&item) {
            tracing::trace!("Rule {} rejected cursor set", self.rule.name());
            return Ok(false);
        }
        let index = self.current.ok_or(ViewError::NoCurrentElement)?;
        let len = self.list.len();
        self.list
            .set(index, item)
            .map(|_| true)
            .ok_or(ViewError::IndexOutOfBounds { index, len })
    }

    /// Insert at the caret. The new element ends up before the caret, so a
    /// following `next` is unaffected.
    ///
    /// Returns false when the rule rejected `item`.
    pub fn add(&mut self, item: L::Item) -> bool {
        if !self.rule.accept(&item) {
            tracing::trace!("Rule {} rejected cursor add", self.rule.name());
            return false;
        }
        if self.list.insert_at(self.position, item).is_err() {
            return false;
        }
        self.position += 1;
        self.current = None;
        true
    }
}
