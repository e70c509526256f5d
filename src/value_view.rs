//! Live view over a map's values.
//!
//! Values are not unique and not indexed: membership is a linear scan, and
//! removing a value removes every pair holding it.

use crate::entry::hash_of;
use crate::error::{Result, UnsupportedOperationSnafu};
use crate::iter::ValueIter;
use crate::key_view::fill_or_allocate;
use crate::map_adapter::Inner;
use crate::view::ViewRef;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use std::collections::hash_map::RandomState;
use std::rc::Rc;

/// The values of a [`MapAdapter`](crate::MapAdapter), one per pair.
pub struct ValueView<K, V, S = RandomState> {
    pub(crate) inner: Rc<Inner<K, V, S>>,
}

impl<K, V, S> ValueView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
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

    pub fn clear(&self) {
        let mut store = self.inner.map.borrow_mut();
        let removed = store.len();
        store.clear();
        tracing::trace!(target: "view_map", removed, "value view clear");
    }

    pub fn contains(&self, value: &V) -> bool {
        self.inner.map.borrow().contains_value(value)
    }

    /// Remove every pair whose value equals `value`; true if any was removed.
    pub fn remove(&self, value: &V) -> bool {
        let removed = self.inner.map.borrow_mut().retain(|_, v| v != value);
        removed > 0
    }

    pub fn add(&self, _value: V) -> Result<bool> {
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

    /// True iff every value of `other` occurs here. `other` must be a value view.
    pub fn contains_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let values = other.into().into_values()?.to_vec();
        let store = self.inner.map.borrow();
        Ok(values.iter().all(|v| store.contains_value(v)))
    }

    /// Remove every pair whose value occurs in `other`; the same as calling
    /// `remove` once per value of `other`.
    pub fn remove_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let doomed = other.into().into_values()?.to_vec();
        let removed = self
            .inner
            .map
            .borrow_mut()
            .retain(|_, v| !doomed.contains(v));
        tracing::debug!(target: "view_map", removed, "value view remove_all");
        Ok(removed > 0)
    }

    /// Remove every pair whose value does not occur in `other`.
    pub fn retain_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let keep = other.into().into_values()?.to_vec();
        let removed = self
            .inner
            .map
            .borrow_mut()
            .retain(|_, v| keep.contains(v));
        tracing::debug!(target: "view_map", removed, "value view retain_all");
        Ok(removed > 0)
    }

    pub fn iter(&self) -> ValueIter<K, V, S> {
        ValueIter::new(Rc::clone(&self.inner))
    }

    pub fn to_vec(&self) -> Vec<V> {
        self.inner
            .map
            .borrow()
            .iter()
            .map(|(_, _, v)| v.clone())
            .collect()
    }

    pub fn to_array_in(&self, dest: Vec<Option<V>>) -> Vec<Option<V>> {
        fill_or_allocate(dest, self.to_vec())
    }

    /// Same kind, same size, and each side contains every value of the other.
    pub fn equals<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> bool
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        match other.into().into_values() {
            Ok(o) => {
                self.len() == o.len()
                    && self.contains_all(o).unwrap_or(false)
                    && o.contains_all(self).unwrap_or(false)
            }
            Err(_) => false,
        }
    }

    /// Sum of the value hashes, wrapping.
    pub fn hash_code(&self) -> u64
    where
        V: Hash,
    {
        self.inner
            .map
            .borrow()
            .iter()
            .fold(0u64, |acc, (_, _, v)| acc.wrapping_add(hash_of(v)))
    }
}

impl<K, V, S> PartialEq for ValueView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<K, V, S> Hash for ValueView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Hash + Clone,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K, V, S> fmt::Debug for ValueView<K, V, S>
where
    K: Eq + Hash,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.map.borrow();
        f.debug_list()
            .entries(store.iter().map(|(_, _, v)| v))
            .finish()
    }
}

impl<'v, K, V, S> IntoIterator for &'v ValueView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    type Item = V;
    type IntoIter = ValueIter<K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
