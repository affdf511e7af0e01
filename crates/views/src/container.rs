//! Backing container contracts.
//!
//! Views never know the concrete container they govern. They talk to it
//! through three traits:
//! - [`Container`]: insert, remove, iterate, retain, length, clear
//! - [`ListContainer`]: adds positional access on top of `Container`
//! - [`MapContainer`]: keyed storage whose values are filtered
//!
//! Implementations are provided for the standard collections, for `&mut`
//! borrows of any implementor, and for two adapters that views hand out:
//! [`SubList`] (a live window over a list) and [`Values`] (the values of a
//! map seen as a collection).

use std::collections::{btree_map, btree_set, hash_map, hash_set, vec_deque};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

// =============================================================================
// Collection contract
// =============================================================================

/// Minimal contract a view needs from a backing collection.
pub trait Container {
    type Item;

    /// Borrowing iterator over the current contents
    type Iter<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Insert an element. Returns true if the container changed.
    fn insert(&mut self, item: Self::Item) -> bool;

    /// Remove one occurrence of `item`. Returns true if it was present.
    fn remove_item(&mut self, item: &Self::Item) -> bool;

    fn contains(&self, item: &Self::Item) -> bool;

    /// Keep only the elements for which `keep` returns true.
    ///
    /// Every element is visited exactly once, and the container is never
    /// observed half-mutated by `keep`.
    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Self::Item) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn iter(&self) -> Self::Iter<'_>;
}

/// Positional access on top of [`Container`].
///
/// Positions follow `Vec` conventions: `insert_at` accepts `index == len`,
/// everything else requires `index < len`. Implementations return `None`
/// instead of panicking when the index is out of range.
pub trait ListContainer: Container {
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// Replace the element at `index`, returning the old one.
    fn set(&mut self, index: usize, item: Self::Item) -> Option<Self::Item>;

    /// Insert at `index`, shifting later elements right.
    /// Hands the item back if `index > len`.
    fn insert_at(&mut self, index: usize, item: Self::Item) -> Result<(), Self::Item>;

    /// Remove and return the element at `index`.
    fn remove_at(&mut self, index: usize) -> Option<Self::Item>;
}

// =============================================================================
// Standard collections
// =============================================================================

impl<T: PartialEq> Container for Vec<T> {
    type Item = T;
    type Iter<'a>
        = std::slice::Iter<'a, T>
    where
        Self: 'a;

    fn insert(&mut self, item: T) -> bool {
        self.push(item);
        true
    }

    fn remove_item(&mut self, item: &T) -> bool {
        match self.iter().position(|existing| existing == item) {
            Some(index) => {
                self.remove(index);
                true
            }
            None => false,
        }
    }

    fn contains(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        Vec::retain(self, keep)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn clear(&mut self) {
        Vec::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }
}

impl<T: PartialEq> ListContainer for Vec<T> {
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn set(&mut self, index: usize, item: T) -> Option<T> {
        let slot = self.as_mut_slice().get_mut(index)?;
        Some(std::mem::replace(slot, item))
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<(), T> {
        if index > Vec::len(self) {
            return Err(item);
        }
        Vec::insert(self, index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < Vec::len(self) {
            Some(Vec::remove(self, index))
        } else {
            None
        }
    }
}

impl<T: PartialEq> Container for VecDeque<T> {
    type Item = T;
    type Iter<'a>
        = vec_deque::Iter<'a, T>
    where
        Self: 'a;

    fn insert(&mut self, item: T) -> bool {
        self.push_back(item);
        true
    }

    fn remove_item(&mut self, item: &T) -> bool {
        match VecDeque::iter(self).position(|existing| existing == item) {
            Some(index) => VecDeque::remove(self, index).is_some(),
            None => false,
        }
    }

    fn contains(&self, item: &T) -> bool {
        VecDeque::contains(self, item)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        VecDeque::retain(self, keep)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn clear(&mut self) {
        VecDeque::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }
}

impl<T: PartialEq> ListContainer for VecDeque<T> {
    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }

    fn set(&mut self, index: usize, item: T) -> Option<T> {
        let slot = VecDeque::get_mut(self, index)?;
        Some(std::mem::replace(slot, item))
    }

    fn insert_at(&mut self, index: usize, item: T) -> Result<(), T> {
        if index > VecDeque::len(self) {
            return Err(item);
        }
        VecDeque::insert(self, index, item);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        VecDeque::remove(self, index)
    }
}

impl<T: Hash + Eq> Container for HashSet<T> {
    type Item = T;
    type Iter<'a>
        = hash_set::Iter<'a, T>
    where
        Self: 'a;

    fn insert(&mut self, item: T) -> bool {
        HashSet::insert(self, item)
    }

    fn remove_item(&mut self, item: &T) -> bool {
        HashSet::remove(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        HashSet::contains(self, item)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        HashSet::retain(self, keep)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn clear(&mut self) {
        HashSet::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashSet::iter(self)
    }
}

impl<T: Ord> Container for BTreeSet<T> {
    type Item = T;
    type Iter<'a>
        = btree_set::Iter<'a, T>
    where
        Self: 'a;

    fn insert(&mut self, item: T) -> bool {
        BTreeSet::insert(self, item)
    }

    fn remove_item(&mut self, item: &T) -> bool {
        BTreeSet::remove(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        BTreeSet::contains(self, item)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        BTreeSet::retain(self, keep)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn clear(&mut self) {
        BTreeSet::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeSet::iter(self)
    }
}

// =============================================================================
// Borrowed containers
// =============================================================================
// Lets a view govern a container it does not own, e.g. a sub-list view over
// `&mut Vec<T>` or a cleaning pass over a list view's own backing.

impl<C: Container + ?Sized> Container for &mut C {
    type Item = C::Item;
    type Iter<'a>
        = C::Iter<'a>
    where
        Self: 'a;

    fn insert(&mut self, item: C::Item) -> bool {
        (**self).insert(item)
    }

    fn remove_item(&mut self, item: &C::Item) -> bool {
        (**self).remove_item(item)
    }

    fn contains(&self, item: &C::Item) -> bool {
        (**self).contains(item)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&C::Item) -> bool,
    {
        (**self).retain(keep)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }
}

impl<L: ListContainer + ?Sized> ListContainer for &mut L {
    fn get(&self, index: usize) -> Option<&L::Item> {
        (**self).get(index)
    }

    fn set(&mut self, index: usize, item: L::Item) -> Option<L::Item> {
        (**self).set(index, item)
    }

    fn insert_at(&mut self, index: usize, item: L::Item) -> Result<(), L::Item> {
        (**self).insert_at(index, item)
    }

    fn remove_at(&mut self, index: usize) -> Option<L::Item> {
        (**self).remove_at(index)
    }
}

// =============================================================================
// SubList - live window over a list
// =============================================================================

/// The positions `[from, to)` of a parent list, seen as a list of their own.
///
/// Writes go straight to the parent. The window grows and shrinks as
/// elements are inserted or removed through it; elements before `from` and
/// from the original `to` onward are never touched.
#[derive(Debug)]
pub struct SubList<'a, L: ?Sized> {
    parent: &'a mut L,
    from: usize,
    to: usize,
}

impl<'a, L: ListContainer + ?Sized> SubList<'a, L> {
    /// Window over `parent[from..to]`. Callers check `from <= to <= len`.
    pub(crate) fn new(parent: &'a mut L, from: usize, to: usize) -> Self {
        debug_assert!(from <= to && to <= parent.len());
        Self { parent, from, to }
    }
}

/// Iterator over a [`SubList`] window
pub struct SubListIter<'a, L: ?Sized> {
    parent: &'a L,
    position: usize,
    end: usize,
}

impl<'a, L: ListContainer + ?Sized> Iterator for SubListIter<'a, L> {
    type Item = &'a L::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.end {
            return None;
        }
        let item = self.parent.get(self.position);
        self.position += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<L> Container for SubList<'_, L>
where
    L: ListContainer + ?Sized,
    L::Item: PartialEq,
{
    type Item = L::Item;
    type Iter<'b>
        = SubListIter<'b, L>
    where
        Self: 'b;

    fn insert(&mut self, item: L::Item) -> bool {
        match self.parent.insert_at(self.to, item) {
            Ok(()) => {
                self.to += 1;
                true
            }
            Err(_) => false,
        }
    }

    fn remove_item(&mut self, item: &L::Item) -> bool {
        let found = (self.from..self.to).find(|&index| self.parent.get(index) == Some(item));
        match found {
            Some(index) => {
                self.parent.remove_at(index);
                self.to -= 1;
                true
            }
            None => false,
        }
    }

    fn contains(&self, item: &L::Item) -> bool {
        Container::iter(self).any(|existing| existing == item)
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&L::Item) -> bool,
    {
        let mut index = self.from;
        while index < self.to {
            let kept = match self.parent.get(index) {
                Some(item) => keep(item),
                None => break,
            };
            if kept {
                index += 1;
            } else {
                self.parent.remove_at(index);
                self.to -= 1;
            }
        }
    }

    fn len(&self) -> usize {
        self.to - self.from
    }

    fn clear(&mut self) {
        while self.to > self.from {
            self.to -= 1;
            self.parent.remove_at(self.to);
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        SubListIter {
            parent: &*self.parent,
            position: self.from,
            end: self.to,
        }
    }
}

impl<L> ListContainer for SubList<'_, L>
where
    L: ListContainer + ?Sized,
    L::Item: PartialEq,
{
    fn get(&self, index: usize) -> Option<&L::Item> {
        if index < self.len() {
            self.parent.get(self.from + index)
        } else {
            None
        }
    }

    fn set(&mut self, index: usize, item: L::Item) -> Option<L::Item> {
        if index < self.len() {
            self.parent.set(self.from + index, item)
        } else {
            None
        }
    }

    fn insert_at(&mut self, index: usize, item: L::Item) -> Result<(), L::Item> {
        if index > self.len() {
            return Err(item);
        }
        self.parent.insert_at(self.from + index, item)?;
        self.to += 1;
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Option<L::Item> {
        if index >= self.len() {
            return None;
        }
        let removed = self.parent.remove_at(self.from + index)?;
        self.to -= 1;
        Some(removed)
    }
}

impl<L> PartialEq for SubList<'_, L>
where
    L: ListContainer + ?Sized,
    L::Item: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        Container::iter(self).eq(Container::iter(other))
    }
}

impl<L> Hash for SubList<'_, L>
where
    L: ListContainer + ?Sized,
    L::Item: PartialEq + Hash,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for item in Container::iter(self) {
            item.hash(state);
        }
    }
}

// =============================================================================
// Map contract
// =============================================================================

/// Minimal contract a map view needs from a backing map.
pub trait MapContainer {
    type Key;
    type Value;

    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;
    type Keys<'a>: Iterator<Item = &'a Self::Key>
    where
        Self: 'a;
    type Values<'a>: Iterator<Item = &'a Self::Value>
    where
        Self: 'a;

    /// Insert or replace, returning the previous value for `key`.
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    /// Keep only the entries for which `keep` returns true.
    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Self::Key, &Self::Value) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn iter(&self) -> Self::Iter<'_>;

    fn keys(&self) -> Self::Keys<'_>;

    fn values(&self) -> Self::Values<'_>;
}

impl<K: Hash + Eq, V> MapContainer for HashMap<K, V> {
    type Key = K;
    type Value = V;
    type Iter<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Keys<'a>
        = hash_map::Keys<'a, K, V>
    where
        Self: 'a;
    type Values<'a>
        = hash_map::Values<'a, K, V>
    where
        Self: 'a;

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        HashMap::retain(self, |key, value| keep(key, &*value))
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn clear(&mut self) {
        HashMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }

    fn keys(&self) -> Self::Keys<'_> {
        HashMap::keys(self)
    }

    fn values(&self) -> Self::Values<'_> {
        HashMap::values(self)
    }
}

impl<K: Ord, V> MapContainer for BTreeMap<K, V> {
    type Key = K;
    type Value = V;
    type Iter<'a>
        = btree_map::Iter<'a, K, V>
    where
        Self: 'a;
    type Keys<'a>
        = btree_map::Keys<'a, K, V>
    where
        Self: 'a;
    type Values<'a>
        = btree_map::Values<'a, K, V>
    where
        Self: 'a;

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTreeMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        BTreeMap::retain(self, |key, value| keep(key, &*value))
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn clear(&mut self) {
        BTreeMap::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeMap::iter(self)
    }

    fn keys(&self) -> Self::Keys<'_> {
        BTreeMap::keys(self)
    }

    fn values(&self) -> Self::Values<'_> {
        BTreeMap::values(self)
    }
}

impl<M: MapContainer + ?Sized> MapContainer for &mut M {
    type Key = M::Key;
    type Value = M::Value;
    type Iter<'a>
        = M::Iter<'a>
    where
        Self: 'a;
    type Keys<'a>
        = M::Keys<'a>
    where
        Self: 'a;
    type Values<'a>
        = M::Values<'a>
    where
        Self: 'a;

    fn insert(&mut self, key: M::Key, value: M::Value) -> Option<M::Value> {
        (**self).insert(key, value)
    }

    fn get(&self, key: &M::Key) -> Option<&M::Value> {
        (**self).get(key)
    }

    fn remove(&mut self, key: &M::Key) -> Option<M::Value> {
        (**self).remove(key)
    }

    fn contains_key(&self, key: &M::Key) -> bool {
        (**self).contains_key(key)
    }

    fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&M::Key, &M::Value) -> bool,
    {
        (**self).retain(keep)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }

    fn keys(&self) -> Self::Keys<'_> {
        (**self).keys()
    }

    fn values(&self) -> Self::Values<'_> {
        (**self).values()
    }
}

// =============================================================================
// Values - a map's values as a collection
// =============================================================================

/// The values of a map, seen as a [`Container`].
///
/// Removing a value removes the whole entry it belongs to. Values cannot be
/// added without a key, so `insert` leaves the map alone and returns false.
#[derive(Debug)]
pub struct Values<'a, M: ?Sized> {
    map: &'a mut M,
}

impl<'a, M: MapContainer + ?Sized> Values<'a, M> {
    pub(crate) fn new(map: &'a mut M) -> Self {
        Self { map }
    }
}

impl<M> Container for Values<'_, M>
where
    M: MapContainer + ?Sized,
    M::Value: PartialEq,
{
    type Item = M::Value;
    type Iter<'b>
        = M::Values<'b>
    where
        Self: 'b;

    fn insert(&mut self, _item: M::Value) -> bool {
        false
    }

    fn remove_item(&mut self, item: &M::Value) -> bool {
        let mut removed = false;
        self.map.retain(|_, value| {
            if !removed && value == item {
                removed = true;
                false
            } else {
                true
            }
        });
        removed
    }

    fn contains(&self, item: &M::Value) -> bool {
        self.map.values().any(|value| value == item)
    }

    fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&M::Value) -> bool,
    {
        self.map.retain(|_, value| keep(value))
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.map.values()
    }
}

impl<M> PartialEq for Values<'_, M>
where
    M: MapContainer + PartialEq + ?Sized,
{
    fn eq(&self, other: &Self) -> bool {
        *self.map == *other.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_positional_bounds() {
        let mut list = vec![1, 2, 3];
        assert_eq!(ListContainer::set(&mut list, 1, 20), Some(2));
        assert_eq!(ListContainer::set(&mut list, 3, 40), None);
        assert_eq!(list.insert_at(4, 9), Err(9));
        assert_eq!(list.insert_at(3, 4), Ok(()));
        assert_eq!(list.remove_at(9), None);
        assert_eq!(list, vec![1, 20, 3, 4]);
    }

    #[test]
    fn test_vec_remove_item_removes_first_occurrence() {
        let mut list = vec![1, 2, 1];
        assert!(list.remove_item(&1));
        assert_eq!(list, vec![2, 1]);
        assert!(!list.remove_item(&7));
    }

    #[test]
    fn test_sub_list_tracks_its_window() {
        let mut list = vec![0, 1, 2, 3, 4, 5];
        {
            let mut window = SubList::new(&mut list, 1, 4);
            assert_eq!(Container::len(&window), 3);
            assert!(Container::insert(&mut window, 9));
            assert_eq!(Container::iter(&window).copied().collect::<Vec<_>>(), vec![1, 2, 3, 9]);

            window.retain(|x| x % 2 == 1);
            assert_eq!(Container::iter(&window).copied().collect::<Vec<_>>(), vec![1, 3, 9]);
            assert_eq!(ListContainer::get(&window, 2), Some(&9));
            assert_eq!(ListContainer::get(&window, 3), None);
        }
        assert_eq!(list, vec![0, 1, 3, 9, 4, 5]);
    }

    #[test]
    fn test_sub_list_clear_leaves_rest_untouched() {
        let mut list = vec![0, 1, 2, 3];
        {
            let mut window = SubList::new(&mut list, 1, 3);
            Container::clear(&mut window);
            assert!(Container::is_empty(&window));
        }
        assert_eq!(list, vec![0, 3]);
    }

    #[test]
    fn test_values_remove_whole_entry() {
        let mut map = BTreeMap::from([(1, "a"), (2, "b"), (3, "a")]);
        {
            let mut values = Values::new(&mut map);
            assert!(values.contains(&"b"));
            assert!(values.remove_item(&"a"));
            assert!(!values.insert("z"));
            assert_eq!(Container::len(&values), 2);
        }
        assert_eq!(map, BTreeMap::from([(2, "b"), (3, "a")]));
    }

    #[test]
    fn test_values_retain_drops_keys() {
        let mut map = HashMap::from([(1, 10), (2, 11), (3, 12)]);
        Values::new(&mut map).retain(|value| value % 2 == 0);
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key(&2));
    }
}
