//! Filtered view over an arbitrary collection.
//!
//! `FilteredCollection` is the workhorse of the crate: it owns the purge
//! routine that the list and map views delegate to.
//!
//! ## Invariants
//! 1. Right after construction every element of the backing collection is
//!    accepted by the rule.
//! 2. Every operation that exposes contents (iteration, length, membership,
//!    export) purges first, so elements slipped in through
//!    [`FilteredCollection::backing_mut`] are never observed.
//! 3. Insertion through the view never stores a rejected element.

use crate::builder::{BuildView, ViewBuilder};
use crate::container::Container;
use crate::rule::{Cleaner, Rule};

/// A live, rule-governed projection of a backing collection.
#[derive(Debug, Clone)]
pub struct FilteredCollection<C, R> {
    backing: C,
    rule: R,
}

impl<C, R> FilteredCollection<C, R>
where
    C: Container,
    R: Rule<C::Item>,
{
    /// Create a new FilteredCollection.
    ///
    /// Elements of `backing` rejected by `rule` are removed immediately.
    pub fn new(backing: C, rule: R) -> Self {
        let mut view = Self::wrap(backing, rule);
        view.clean();
        view
    }

    pub fn builder() -> ViewBuilder<Self> {
        ViewBuilder::new()
    }

    /// Pair a backing collection with a rule without the construction purge.
    ///
    /// Used by the list and map views to run their cleaning passes.
    pub(crate) fn wrap(backing: C, rule: R) -> Self {
        Self { backing, rule }
    }

    /// Add an element through the view.
    ///
    /// # Returns
    /// * `false` - the rule rejected `item` (nothing changed), or the backing
    ///   collection refused it (e.g. a duplicate in a set)
    /// * `true` - the backing collection changed
    pub fn add(&mut self, item: C::Item) -> bool {
        if !self.rule.accept(&item) {
            tracing::trace!("Rule {} rejected add", self.rule.name());
            return false;
        }
        self.backing.insert(item)
    }

    /// Add elements one at a time.
    ///
    /// Not atomic: elements accepted before a rejected one stay inserted.
    /// Returns true only if every single `add` returned true.
    pub fn add_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = C::Item>,
    {
        let mut all_added = true;
        for item in items {
            all_added &= self.add(item);
        }
        all_added
    }

    pub fn contains(&mut self, item: &C::Item) -> bool {
        self.clean();
        self.backing.contains(item)
    }

    pub fn contains_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a C::Item>,
        C::Item: 'a,
    {
        self.clean();
        items.into_iter().all(|item| self.backing.contains(item))
    }

    /// Iterate over the accepted elements.
    pub fn iter(&mut self) -> C::Iter<'_> {
        self.clean();
        self.backing.iter()
    }

    /// Copy the accepted elements into a Vec.
    pub fn to_vec(&mut self) -> Vec<C::Item>
    where
        C::Item: Clone,
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

    pub fn remove(&mut self, item: &C::Item) -> bool {
        self.clean();
        self.backing.remove_item(item)
    }

    /// Remove every occurrence of each of `items`.
    ///
    /// Returns true if anything was removed.
    pub fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a C::Item>,
        C::Item: 'a,
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
    /// If any of `items` is rejected by the rule the whole call is refused:
    /// nothing is removed and false is returned. Otherwise returns true if
    /// anything was removed.
    pub fn retain_all(&mut self, items: &[C::Item]) -> bool
    where
        C::Item: PartialEq,
    {
        if items.iter().any(|item| !self.rule.accept(item)) {
            tracing::trace!("Rule {} refused retain_all", self.rule.name());
            return false;
        }
        self.clean();
        let before = self.backing.len();
        self.backing.retain(|item| items.contains(item));
        self.backing.len() != before
    }

    pub fn clear(&mut self) {
        self.backing.clear()
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// The backing collection as it is, possibly holding rejected elements.
    pub fn backing(&self) -> &C {
        &self.backing
    }

    /// Direct access to the backing collection, bypassing the rule.
    ///
    /// Anything inserted here that the rule rejects is purged by the next
    /// reading call on the view.
    pub fn backing_mut(&mut self) -> &mut C {
        &mut self.backing
    }

    pub fn into_parts(self) -> (C, R) {
        (self.backing, self.rule)
    }
}

impl<C, R> Cleaner for FilteredCollection<C, R>
where
    C: Container,
    R: Rule<C::Item>,
{
    /// Single pass over the backing collection removing rejected elements.
    fn clean(&mut self) -> usize {
        let rule = &self.rule;
        let mut removed = 0;
        self.backing.retain(|item| {
            let keep = rule.accept(item);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            tracing::debug!("Rule {} purged {} element(s)", rule.name(), removed);
        }
        removed
    }
}

impl<C, R> BuildView for FilteredCollection<C, R>
where
    C: Container,
    R: Rule<C::Item>,
{
    type Backing = C;
    type Rule = R;

    fn from_parts(backing: C, rule: R) -> Self {
        Self::new(backing, rule)
    }
}

impl<C: PartialEq, R: PartialEq> PartialEq for FilteredCollection<C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.rule == other.rule && self.backing == other.backing
    }
}

impl<C: Eq, R: Eq> Eq for FilteredCollection<C, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use crate::rules::{AcceptAll, MultipleOf, NotEqual, SharedRule};
    use std::collections::{BTreeSet, HashSet};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, SubscriberExt};

    /// Counts every event emitted while installed.
    #[derive(Clone, Default)]
    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_construction_purges() {
        let mut view = FilteredCollection::new(vec![1, 2, 1, 3], NotEqual::new(1));
        assert_eq!(view.backing(), &vec![2, 3]);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_construction_purge_logged_once() {
        let counter = EventCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());

        let view = tracing::subscriber::with_default(subscriber, || {
            FilteredCollection::new(vec![1, 2, 1], NotEqual::new(1))
        });

        assert_eq!(view.backing(), &vec![2]);
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_add_rejected_is_silent() {
        let mut view = FilteredCollection::new(HashSet::new(), NotEqual::new(1));
        assert!(!view.add(1));
        assert!(view.add(2));
        assert!(!view.add(2));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_add_all_is_partial() {
        let mut view = FilteredCollection::new(Vec::new(), NotEqual::new(0));
        assert!(!view.add_all(vec![1, 0, 2]));
        assert_eq!(view.to_vec(), vec![1, 2]);
        assert!(view.add_all(vec![3, 4]));
    }

    #[test]
    fn test_reads_purge_bypass_inserts() {
        let mut view = FilteredCollection::new(vec![2], NotEqual::new(1));
        view.backing_mut().push(1);
        assert!(!view.contains(&1));
        assert_eq!(view.backing(), &vec![2]);

        view.backing_mut().push(1);
        assert_eq!(view.iter().count(), 1);

        view.backing_mut().push(1);
        assert_eq!(view.to_vec(), vec![2]);

        view.backing_mut().push(1);
        assert!(!view.is_empty());
        assert_eq!(view.backing().len(), 1);
    }

    #[test]
    fn test_clean_reports_count() {
        let mut view = FilteredCollection::new(Vec::new(), MultipleOf::new(2).unwrap());
        view.backing_mut().extend([1, 2, 3, 4, 5]);
        assert_eq!(view.clean(), 3);
        assert_eq!(view.clean(), 0);
    }

    #[test]
    fn test_remove_and_remove_all() {
        let mut view = FilteredCollection::new(vec![2, 4, 2, 6], NotEqual::new(1));
        assert!(view.remove(&4));
        assert!(!view.remove(&4));
        assert!(view.remove_all([&2]));
        assert_eq!(view.to_vec(), vec![6]);
        assert!(!view.remove_all([&8]));
    }

    #[test]
    fn test_retain_all_guard() {
        let mut view = FilteredCollection::new(vec![2, 3, 4], NotEqual::new(1));

        assert!(!view.retain_all(&[2, 1]));
        assert_eq!(view.to_vec(), vec![2, 3, 4]);

        assert!(view.retain_all(&[2, 4]));
        assert_eq!(view.to_vec(), vec![2, 4]);
        assert!(!view.retain_all(&[2, 4]));
    }

    #[test]
    fn test_contains_all_and_clear() {
        let mut view = FilteredCollection::new(BTreeSet::from([1, 2, 3]), AcceptAll);
        assert!(view.contains_all(&[1, 3]));
        assert!(!view.contains_all(&[1, 9]));
        view.clear();
        assert!(view.is_empty());
    }

    #[test]
    fn test_equality_needs_equal_rules() {
        let rule = SharedRule::new(NotEqual::new(1));
        let a = FilteredCollection::new(vec![2, 3], rule.clone());
        let b = FilteredCollection::new(vec![2, 3], rule);
        let c = FilteredCollection::new(vec![2, 3], SharedRule::new(NotEqual::new(1)));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(
            FilteredCollection::new(vec![5], NotEqual::new(1)),
            FilteredCollection::new(vec![5], NotEqual::new(1))
        );
    }

    #[test]
    fn test_builder_preconditions() {
        let missing_backing = FilteredCollection::<Vec<i32>, NotEqual<i32>>::builder()
            .rule(NotEqual::new(1))
            .build();
        assert_eq!(missing_backing.unwrap_err(), ViewError::MissingBacking);

        let missing_rule = FilteredCollection::<Vec<i32>, NotEqual<i32>>::builder()
            .backing(vec![1])
            .build();
        assert_eq!(missing_rule.unwrap_err(), ViewError::MissingRule);

        let mut view = FilteredCollection::<Vec<i32>, NotEqual<i32>>::builder()
            .backing(vec![1, 2])
            .rule(NotEqual::new(1))
            .build()
            .unwrap();
        assert_eq!(view.to_vec(), vec![2]);
    }
}
