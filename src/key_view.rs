//! Live view over a map's keys.

use crate::entry::hash_of;
use crate::error::{Result, UnsupportedOperationSnafu};
use crate::iter::KeyIter;
use crate::map_adapter::Inner;
use crate::view::ViewRef;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::rc::Rc;

/// The keys of a [`MapAdapter`](crate::MapAdapter), read live from its store.
/// Removing a key removes its pair from the map; adding is not supported.
pub struct KeyView<K, V, S = RandomState> {
    pub(crate) inner: Rc<Inner<K, V, S>>,
}

impl<K, V, S> KeyView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    pub(crate) fn new(inner: Rc<Inner<K, V, S>>) -> Self {
        Self { inner }
    }

    pub fn len(&self) -> usize {
        self.inner.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.map.borrow().is_empty()
    }

    /// Removes every pair from the map.
    pub fn clear(&self) {
        let mut store = self.inner.map.borrow_mut();
        let removed = store.len();
        store.clear();
        tracing::trace!(target: "view_map", removed, "key view clear");
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.map.borrow().contains_key(key)
    }

    /// Remove the pair stored under `key`; true if there was one.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.map.borrow_mut().remove(key).is_some()
    }

    pub fn add(&self, _key: K) -> Result<bool> {
        UnsupportedOperationSnafu { operation: "add" }.fail()
    }

    pub fn add_all<'a>(&self, _other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        UnsupportedOperationSnafu { operation: "add_all" }.fail()
    }

    /// True iff every key of `other` is a key here. `other` must be a key view.
    pub fn contains_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let keys = other.into().into_keys()?.to_vec();
        let store = self.inner.map.borrow();
        Ok(keys.iter().all(|k| store.contains_key(k)))
    }

    /// Remove every key that `other` holds; true if anything was removed.
    pub fn remove_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let keys = other.into().into_keys()?.to_vec();
        let mut store = self.inner.map.borrow_mut();
        let removed = keys.iter().filter(|k| store.remove(*k).is_some()).count();
        tracing::debug!(target: "view_map", removed, "key view remove_all");
        Ok(removed > 0)
    }

    /// Remove every key that `other` does not hold, in place; the map keeps
    /// its store, so every other view observes the result.
    pub fn retain_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let keep: HashSet<K> = other.into().into_keys()?.to_vec().into_iter().collect();
        let removed = self
            .inner
            .map
            .borrow_mut()
            .retain(|k, _| keep.contains(k));
        tracing::debug!(target: "view_map", removed, "key view retain_all");
        Ok(removed > 0)
    }

    pub fn iter(&self) -> KeyIter<K, V, S> {
        KeyIter::new(Rc::clone(&self.inner))
    }

    /// All keys in enumeration order.
    pub fn to_vec(&self) -> Vec<K> {
        self.inner
            .map
            .borrow()
            .iter()
            .map(|(_, k, _)| k.clone())
            .collect()
    }

    /// Fill `dest` if it has room, padding the tail with `None`; otherwise
    /// return a freshly allocated vector of exactly `len()` keys.
    pub fn to_array_in(&self, dest: Vec<Option<K>>) -> Vec<Option<K>> {
        fill_or_allocate(dest, self.to_vec())
    }

    /// Same kind, same size, same keys. A view of another kind is never equal.
    pub fn equals<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> bool
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        match other.into().into_keys() {
            Ok(o) => self.len() == o.len() && self.contains_all(o).unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Sum of the key hashes, wrapping.
    pub fn hash_code(&self) -> u64 {
        self.inner
            .map
            .borrow()
            .iter()
            .fold(0u64, |acc, (_, k, _)| acc.wrapping_add(hash_of(k)))
    }
}

pub(crate) fn fill_or_allocate<T>(mut dest: Vec<Option<T>>, items: Vec<T>) -> Vec<Option<T>> {
    if dest.len() < items.len() {
        return items.into_iter().map(Some).collect();
    }
    let n = items.len();
    for (slot, item) in dest.iter_mut().zip(items) {
        *slot = Some(item);
    }
    for slot in &mut dest[n..] {
        *slot = None;
    }
    dest
}

impl<K, V, S> PartialEq for KeyView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<K, V, S> Eq for KeyView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
}

impl<K, V, S> Hash for KeyView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K, V, S> fmt::Debug for KeyView<K, V, S>
where
    K: fmt::Debug + Eq + Hash,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.map.borrow();
        f.debug_set()
            .entries(store.iter().map(|(_, k, _)| k))
            .finish()
    }
}

impl<'v, K, V, S> IntoIterator for &'v KeyView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    type Item = K;
    type IntoIter = KeyIter<K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
