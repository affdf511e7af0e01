//! Filtered view over an index-addressable list.
//!
//! Positions always refer to the purged list: every positional operation
//! cleans first, so index `i` means the same thing to the caller as it
//! does to the backing list.

use crate::builder::{BuildView, ViewBuilder};
use crate::collection::FilteredCollection;
use crate::container::{Container, ListContainer, SubList};
use crate::cursor::RestrainedCursor;
use crate::error::{Result, ViewError};
use crate::rule::{Cleaner, Rule};
use std::hash::{Hash, Hasher};

/// A live, rule-governed projection of a backing list.
#[derive(Debug, Clone)]
pub struct FilteredList<L, R> {
    backing: L,
    rule: R,
}

impl<L, R> FilteredList<L, R>
where
    L: ListContainer,
    R: Rule<L::Item>,
{
    /// Create a new FilteredList.
    ///
    /// Rejected elements of `backing` are removed immediately; the
    /// survivors keep their relative order.
    pub fn new(backing: L, rule: R) -> Self {
        let mut view = Self { backing, rule };
        view.clean();
        view
    }

    pub fn builder() -> ViewBuilder<Self> {
        ViewBuilder::new()
    }

    /// Append an element. Returns false if the rule rejected it.
    pub fn add(&mut self, item: L::Item) -> bool {
        if !self.rule.accept(&item) {
            tracing::trace!("Rule {} rejected add", self.rule.name());
            return false;
        }
        self.backing.insert(item)
    }

    /// Append elements one at a time; accepted ones stay even if a later
    /// one is rejected. Returns true only if all were added.
    pub fn add_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = L::Item>,
    {
        let mut all_added = true;
        for item in items {
            all_added &= self.add(item);
        }
        all_added
    }

    /// Insert at `index`.
    ///
    /// # Returns
    /// * `Ok(false)` - the rule rejected `item`; the list is unchanged
    /// * `Ok(true)` - inserted
    ///
    /// # Errors
    /// `ViewError::IndexOutOfBounds` if `index > len`.
    pub fn insert(&mut self, index: usize, item: L::Item) -> Result<bool> {
        if !self.rule.accept(&item) {
            tracing::trace!("Rule {} rejected insert at {}", self.rule.name(), index);
            return Ok(false);
        }
        self.clean();
        let len = self.backing.len();
        self.backing
            .insert_at(index, item)
            .map(|()| true)
            .map_err(|_| ViewError::IndexOutOfBounds { index, len })
    }

    /// Replace the element at `index`.
    ///
    /// # Returns
    /// * `Ok(None)` - the rule rejected `item`; the list is unchanged
    /// * `Ok(Some(old))` - replaced, with the previous element
    ///
    /// # Errors
    /// `ViewError::IndexOutOfBounds` if `index >= len`.
    pub fn set(&mut self, index: usize, item: L::Item) -> Result<Option<L::Item>> {
        if !self.rule.accept(&item) {
            tracing::trace!("Rule {} rejected set at {}", self.rule.name(), index);
            return Ok(None);
        }
        self.clean();
        let len = self.backing.len();
        match self.backing.set(index, item) {
            Some(previous) => Ok(Some(previous)),
            None => Err(ViewError::IndexOutOfBounds { index, len }),
        }
    }

    /// Insert accepted elements starting at `index`, each one after the
    /// previous. Rejected elements are skipped.
    ///
    /// Returns true only if nothing was rejected and the cleaning pass that
    /// follows the insertion removed nothing.
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = L::Item>,
    {
        self.clean();
        let len = self.backing.len();
        if index > len {
            return Err(ViewError::IndexOutOfBounds { index, len });
        }

        let mut position = index;
        let mut all_accepted = true;
        for item in items {
            if !self.rule.accept(&item) {
                all_accepted = false;
                continue;
            }
            if self.backing.insert_at(position, item).is_ok() {
                position += 1;
            }
        }

        let purged = self.clean();
        Ok(all_accepted && purged == 0)
    }

    pub fn get(&mut self, index: usize) -> Option<&L::Item> {
        self.clean();
        self.backing.get(index)
    }

    pub fn index_of(&mut self, item: &L::Item) -> Option<usize>
    where
        L::Item: PartialEq,
    {
        self.iter().position(|existing| existing == item)
    }

    pub fn last_index_of(&mut self, item: &L::Item) -> Option<usize>
    where
        L::Item: PartialEq,
    {
        self.clean();
        (0..self.backing.len())
            .rev()
            .find(|&index| self.backing.get(index) == Some(item))
    }

    /// Remove and return the element at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<L::Item> {
        self.clean();
        let len = self.backing.len();
        self.backing
            .remove_at(index)
            .ok_or(ViewError::IndexOutOfBounds { index, len })
    }

    /// Remove the first occurrence of `item`.
    pub fn remove(&mut self, item: &L::Item) -> bool {
        self.clean();
        self.backing.remove_item(item)
    }

    /// Remove every occurrence of each of `items`.
    pub fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a L::Item>,
        L::Item: 'a,
    {
        self.clean();
        let mut changed = false;
        for item in items {
            while self.backing.remove_item(item) {
                changed = true;
            }
        }
        changed
    }

    /// Keep only elements contained in `items`.
    ///
    /// Unlike [`FilteredCollection::retain_all`], `items` is not checked
    /// against the rule: the call always goes through.
    pub fn retain_all(&mut self, items: &[L::Item]) -> bool
    where
        L::Item: PartialEq,
    {
        self.clean();
        let before = self.backing.len();
        self.backing.retain(|item| items.contains(item));
        self.backing.len() != before
    }

    /// Remove positions `[from, to)` one at a time.
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<()> {
        self.clean();
        let len = self.backing.len();
        if from > to || to > len {
            return Err(ViewError::InvalidRange { from, to, len });
        }
        for _ in from..to {
            self.backing.remove_at(from);
        }
        tracing::trace!("Removed range {}..{}", from, to);
        Ok(())
    }

    /// A filtered view of positions `[from, to)`.
    ///
    /// The sub-list writes through to this list and is governed by the same
    /// rule: elements added through it are checked, and bypass inserts into
    /// its range are purged by its reads.
    pub fn sub_list(&mut self, from: usize, to: usize) -> Result<FilteredList<SubList<'_, L>, &R>>
    where
        L::Item: PartialEq,
    {
        self.clean();
        let len = self.backing.len();
        if from > to || to > len {
            return Err(ViewError::InvalidRange { from, to, len });
        }
        Ok(FilteredList::new(
            SubList::new(&mut self.backing, from, to),
            &self.rule,
        ))
    }

    /// A restrained cursor positioned before the first element.
    pub fn cursor(&mut self) -> RestrainedCursor<'_, L, R> {
        self.clean();
        RestrainedCursor::new(&mut self.backing, &self.rule, 0)
    }

    /// A restrained cursor positioned before `index`.
    ///
    /// # Errors
    /// `ViewError::IndexOutOfBounds` if `index > len`.
    pub fn cursor_at(&mut self, index: usize) -> Result<RestrainedCursor<'_, L, R>> {
        self.clean();
        let len = self.backing.len();
        if index > len {
            return Err(ViewError::IndexOutOfBounds { index, len });
        }
        Ok(RestrainedCursor::new(&mut self.backing, &self.rule, index))
    }

    pub fn contains(&mut self, item: &L::Item) -> bool {
        self.clean();
        self.backing.contains(item)
    }

    pub fn contains_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a L::Item>,
        L::Item: 'a,
    {
        self.clean();
        items.into_iter().all(|item| self.backing.contains(item))
    }

    pub fn iter(&mut self) -> <L as Container>::Iter<'_> {
        self.clean();
        self.backing.iter()
    }

    pub fn to_vec(&mut self) -> Vec<L::Item>
    where
        L::Item: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn len(&mut self) -> usize {
        self.clean();
        self.backing.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.backing.clear()
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn backing(&self) -> &L {
        &self.backing
    }

    /// Direct access to the backing list, bypassing the rule.
    pub fn backing_mut(&mut self) -> &mut L {
        &mut self.backing
    }

    pub fn into_parts(self) -> (L, R) {
        (self.backing, self.rule)
    }
}

impl<L, R> Cleaner for FilteredList<L, R>
where
    L: ListContainer,
    R: Rule<L::Item>,
{
    fn clean(&mut self) -> usize {
        FilteredCollection::wrap(&mut self.backing, &self.rule).clean()
    }
}

impl<L, R> BuildView for FilteredList<L, R>
where
    L: ListContainer,
    R: Rule<L::Item>,
{
    type Backing = L;
    type Rule = R;

    fn from_parts(backing: L, rule: R) -> Self {
        Self::new(backing, rule)
    }
}

impl<L: PartialEq, R: PartialEq> PartialEq for FilteredList<L, R> {
    fn eq(&self, other: &Self) -> bool {
        self.backing == other.backing && self.rule == other.rule
    }
}

impl<L: Eq, R: Eq> Eq for FilteredList<L, R> {}

/// Hashes the backing list only; rules are not required to be hashable.
impl<L: Hash, R> Hash for FilteredList<L, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.backing.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MultipleOf, NotEqual};
    use std::collections::VecDeque;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_construction_keeps_order() {
        let view = FilteredList::new(vec![1, 2, 1, 3, 1, 4], NotEqual::new(1));
        assert_eq!(view.backing(), &vec![2, 3, 4]);
    }

    #[test]
    fn test_positional_rejection() {
        let mut view = FilteredList::new(vec![2, 4], MultipleOf::new(2).unwrap());

        assert_eq!(view.insert(1, 3), Ok(false));
        assert_eq!(view.insert(1, 6), Ok(true));
        assert_eq!(view.set(0, 5), Ok(None));
        assert_eq!(view.set(0, 8), Ok(Some(2)));
        assert_eq!(view.to_vec(), vec![8, 6, 4]);

        assert_eq!(
            view.insert(9, 10),
            Err(ViewError::IndexOutOfBounds { index: 9, len: 3 })
        );
        assert_eq!(
            view.set(3, 10),
            Err(ViewError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_insert_all_growing_index() {
        let mut view = FilteredList::new(vec![0, 9], NotEqual::new(-1));
        assert_eq!(view.insert_all(1, vec![1, 2, 3]), Ok(true));
        assert_eq!(view.to_vec(), vec![0, 1, 2, 3, 9]);

        assert_eq!(view.insert_all(5, vec![4, -1, 5]), Ok(false));
        assert_eq!(view.to_vec(), vec![0, 1, 2, 3, 9, 4, 5]);
    }

    #[test]
    fn test_insert_all_reports_bypass_purge() {
        let mut view = FilteredList::new(vec![1], NotEqual::new(0));
        assert_eq!(view.insert_all(0, vec![2]), Ok(true));
        view.backing_mut().push(0);
        // The bypass element is purged before insertion, not after.
        assert_eq!(view.insert_all(0, vec![3]), Ok(true));
        assert_eq!(view.to_vec(), vec![3, 2, 1]);
    }

    #[test]
    fn test_index_queries_clean_first() {
        let mut view = FilteredList::new(vec![5, 6, 5], NotEqual::new(0));
        view.backing_mut().insert(0, 0);
        assert_eq!(view.index_of(&5), Some(0));
        assert_eq!(view.last_index_of(&5), Some(2));
        assert_eq!(view.index_of(&7), None);

        view.backing_mut().insert(0, 0);
        assert_eq!(view.get(0), Some(&5));
        assert_eq!(view.remove_at(1), Ok(6));
        assert!(view.remove(&5));
        assert_eq!(view.to_vec(), vec![5]);
    }

    #[test]
    fn test_retain_all_is_not_guarded() {
        let mut view = FilteredList::new(vec![2, 3, 4], NotEqual::new(1));
        assert!(view.retain_all(&[1, 2]));
        assert_eq!(view.to_vec(), vec![2]);
    }

    #[test]
    fn test_remove_range() {
        let mut view = FilteredList::new(VecDeque::from([0, 1, 2, 3, 4]), NotEqual::new(9));
        assert_eq!(view.remove_range(1, 3), Ok(()));
        assert_eq!(view.to_vec(), vec![0, 3, 4]);
        assert_eq!(
            view.remove_range(2, 1),
            Err(ViewError::InvalidRange { from: 2, to: 1, len: 3 })
        );
        assert_eq!(view.remove_range(0, 0), Ok(()));
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_sub_list_is_filtered() {
        let mut view = FilteredList::new(vec![10, 20, 30, 40], NotEqual::new(0));
        {
            let mut sub = view.sub_list(1, 3).unwrap();
            assert_eq!(sub.to_vec(), vec![20, 30]);
            assert!(!sub.add(0));
            assert!(sub.add(35));
            assert_eq!(sub.set(0, 0), Ok(None));

            sub.backing_mut().insert(0);
            assert_eq!(sub.len(), 3);
        }
        assert_eq!(view.to_vec(), vec![10, 20, 30, 35, 40]);
        assert!(view.sub_list(3, 2).is_err());
        assert!(view.sub_list(0, 6).is_err());
    }

    #[test]
    fn test_sub_list_clear_empties_only_range() {
        let mut view = FilteredList::new(vec![1, 2, 3, 4], NotEqual::new(0));
        view.sub_list(1, 3).unwrap().clear();
        assert_eq!(view.to_vec(), vec![1, 4]);
    }

    #[test]
    fn test_cursor_cleans_first() {
        let mut view = FilteredList::new(vec![1, 2], NotEqual::new(0));
        view.backing_mut().insert(0, 0);
        {
            let mut cursor = view.cursor();
            assert_eq!(cursor.next(), Some(&1));
            assert!(!cursor.add(0));
            assert!(cursor.add(5));
        }
        assert_eq!(view.to_vec(), vec![1, 5, 2]);

        let mut cursor = view.cursor_at(3).unwrap();
        assert!(!cursor.has_next());
        assert_eq!(cursor.previous(), Some(&2));
        assert!(view.cursor_at(4).is_err());
    }

    #[test]
    fn test_equality_and_hash() {
        let a = FilteredList::new(vec![1, 2], NotEqual::new(0));
        let b = FilteredList::new(vec![1, 2], NotEqual::new(0));
        let c = FilteredList::new(vec![1, 2], NotEqual::new(7));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(hash_of(&a), hash_of(&c));
    }
}
