//! Filtered view over a map, governing values only.
//!
//! Keys are never checked. Cleaning runs through a [`FilteredCollection`]
//! over the map's values, and removing a value removes its whole entry.

use crate::builder::{BuildView, ViewBuilder};
use crate::collection::FilteredCollection;
use crate::container::{MapContainer, Values};
use crate::rule::{Cleaner, Rule};

/// A live, rule-governed projection of a backing map.
#[derive(Debug, Clone)]
pub struct FilteredMap<M, R> {
    backing: M,
    rule: R,
}

impl<M, R> FilteredMap<M, R>
where
    M: MapContainer,
    M::Value: PartialEq,
    R: Rule<M::Value>,
{
    /// Create a new FilteredMap.
    ///
    /// Entries whose value `rule` rejects are removed immediately.
    pub fn new(backing: M, rule: R) -> Self {
        let mut view = Self { backing, rule };
        view.clean();
        view
    }

    pub fn builder() -> ViewBuilder<Self> {
        ViewBuilder::new()
    }

    /// Insert `value` under `key`.
    ///
    /// # Returns
    /// * `None` - the rule rejected `value` (the map is unchanged, any
    ///   existing value for `key` stays), or `key` was vacant
    /// * `Some(previous)` - the value that was replaced
    pub fn insert(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        if !self.rule.accept(&value) {
            tracing::trace!("Rule {} rejected value", self.rule.name());
            return None;
        }
        self.backing.insert(key, value)
    }

    /// Insert entries one at a time. Not atomic: accepted entries stay even
    /// when a later one is rejected. Returns true only if all were accepted.
    pub fn insert_all<I>(&mut self, entries: I) -> bool
    where
        I: IntoIterator<Item = (M::Key, M::Value)>,
    {
        let mut all_accepted = true;
        for (key, value) in entries {
            all_accepted &= self.rule.accept(&value);
            self.insert(key, value);
        }
        all_accepted
    }

    /// The values as a filtered collection governed by the same rule.
    ///
    /// Building the collection runs its construction purge, so calling this
    /// removes entries with rejected values from the map.
    pub fn values(&mut self) -> FilteredCollection<Values<'_, M>, &R> {
        FilteredCollection::new(Values::new(&mut self.backing), &self.rule)
    }

    pub fn len(&mut self) -> usize {
        self.clean();
        self.backing.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &M::Key) -> Option<&M::Value> {
        self.backing.get(key)
    }

    pub fn contains_key(&self, key: &M::Key) -> bool {
        self.backing.contains_key(key)
    }

    pub fn contains_value(&self, value: &M::Value) -> bool {
        self.backing.values().any(|existing| existing == value)
    }

    pub fn keys(&self) -> M::Keys<'_> {
        self.backing.keys()
    }

    /// Entries as stored, without cleaning.
    pub fn iter(&self) -> M::Iter<'_> {
        self.backing.iter()
    }

    pub fn remove(&mut self, key: &M::Key) -> Option<M::Value> {
        self.backing.remove(key)
    }

    pub fn clear(&mut self) {
        self.backing.clear()
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn backing(&self) -> &M {
        &self.backing
    }

    /// Direct access to the backing map, bypassing the rule.
    pub fn backing_mut(&mut self) -> &mut M {
        &mut self.backing
    }

    pub fn into_parts(self) -> (M, R) {
        (self.backing, self.rule)
    }
}

impl<M, R> Cleaner for FilteredMap<M, R>
where
    M: MapContainer,
    M::Value: PartialEq,
    R: Rule<M::Value>,
{
    fn clean(&mut self) -> usize {
        FilteredCollection::wrap(Values::new(&mut self.backing), &self.rule).clean()
    }
}

impl<M, R> BuildView for FilteredMap<M, R>
where
    M: MapContainer,
    M::Value: PartialEq,
    R: Rule<M::Value>,
{
    type Backing = M;
    type Rule = R;

    fn from_parts(backing: M, rule: R) -> Self {
        Self::new(backing, rule)
    }
}

impl<M: PartialEq, R: PartialEq> PartialEq for FilteredMap<M, R> {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule && self.backing == other.backing
    }
}

impl<M: Eq, R: Eq> Eq for FilteredMap<M, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MultipleOf, NotEqual};
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_construction_purges_entries() {
        let view = FilteredMap::new(
            BTreeMap::from([(1, "keep"), (2, "drop"), (3, "keep")]),
            NotEqual::new("drop"),
        );
        assert_eq!(view.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_insert_rejection_keeps_previous() {
        let mut view = FilteredMap::new(HashMap::new(), MultipleOf::new(2).unwrap());
        assert_eq!(view.insert(1, 2), None);
        assert_eq!(view.insert(1, 3), None);
        assert_eq!(view.get(&1), Some(&2));
        assert_eq!(view.insert(1, 4), Some(2));
    }

    #[test]
    fn test_keys_never_filtered() {
        let mut view = FilteredMap::new(BTreeMap::new(), NotEqual::new(0));
        assert_eq!(view.insert(0, 1), None);
        assert!(view.contains_key(&0));
        assert!(view.contains_value(&1));
    }

    #[test]
    fn test_insert_all_is_partial() {
        let mut view = FilteredMap::new(BTreeMap::new(), MultipleOf::new(2).unwrap());
        assert!(!view.insert_all(vec![(1, 2), (2, 3), (3, 4)]));
        assert_eq!(view.len(), 2);
        assert!(view.insert_all([(5, 6)]));

        assert!(!view.insert_all([(1, 7), (5, 8)]));
        assert_eq!(view.get(&1), Some(&2));
        assert_eq!(view.get(&5), Some(&8));
    }

    #[test]
    fn test_len_and_values_purge_bypass() {
        let mut view = FilteredMap::new(HashMap::from([(1, 2)]), MultipleOf::new(2).unwrap());
        view.backing_mut().insert(2, 5);
        assert_eq!(view.values().len(), 1);
        assert!(!view.backing().contains_key(&2));

        view.backing_mut().insert(3, 7);
        assert_eq!(view.len(), 1);
        assert_eq!(view.clean(), 0);
    }

    #[test]
    fn test_values_view_guards_removal() {
        let mut view = FilteredMap::new(BTreeMap::from([(1, 2), (2, 4)]), NotEqual::new(0));
        {
            let mut values = view.values();
            assert!(!values.add(6));
            assert!(values.remove(&2));
        }
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![(&2, &4)]);
        view.remove(&2);
        assert!(view.is_empty());
    }
}
