//! Live view over a map's pairs.

use crate::entry::{hash_of, Element, Entry};
use crate::error::{Result, TypeMismatchSnafu, UnsupportedOperationSnafu, ViewKind};
use crate::handle_hash_map::HandleHashMap;
use crate::iter::EntryIter;
use crate::key_view::fill_or_allocate;
use crate::map_adapter::Inner;
use crate::view::ViewRef;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::rc::Rc;

/// The pairs of a [`MapAdapter`](crate::MapAdapter) as [`Entry`] values.
///
/// Membership tests take an [`Element`] so that a bare key or value can be
/// told apart from a pair and rejected with `TypeMismatch`.
pub struct EntryView<K, V, S = RandomState> {
    pub(crate) inner: Rc<Inner<K, V, S>>,
}

fn expect_entry<K, V>(element: Element<K, V>) -> Result<Entry<K, V>> {
    match element {
        Element::Entry(e) => Ok(e),
        other => TypeMismatchSnafu {
            expected: ViewKind::Entries,
            found: other.kind(),
        }
        .fail(),
    }
}

fn holds<K, V, S>(store: &HandleHashMap<K, V, S>, e: &Entry<K, V>) -> bool
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    store.get(e.key()) == Some(e.value())
}

impl<K, V, S> EntryView<K, V, S>
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
        tracing::trace!(target: "view_map", removed, "entry view clear");
    }

    /// True iff the map stores exactly this key with exactly this value.
    pub fn contains(&self, element: impl Into<Element<K, V>>) -> Result<bool> {
        let e = expect_entry(element.into())?;
        let store = self.inner.map.borrow();
        Ok(holds(&*store, &e))
    }

    /// Remove the pair if the map stores exactly this key/value.
    pub fn remove(&self, element: impl Into<Element<K, V>>) -> Result<bool> {
        let e = expect_entry(element.into())?;
        let mut store = self.inner.map.borrow_mut();
        if !holds(&*store, &e) {
            return Ok(false);
        }
        Ok(store.remove(e.key()).is_some())
    }

    pub fn add(&self, _element: impl Into<Element<K, V>>) -> Result<bool> {
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

    /// True iff every pair of `other` is stored here. A larger `other` is
    /// rejected without scanning.
    pub fn contains_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let other = other.into().into_entries()?;
        if other.len() > self.len() {
            return Ok(false);
        }
        let entries = other.to_vec();
        let store = self.inner.map.borrow();
        Ok(entries.iter().all(|e| holds(&*store, e)))
    }

    pub fn remove_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let entries = other.into().into_entries()?.to_vec();
        let mut store = self.inner.map.borrow_mut();
        let mut removed = 0usize;
        for e in &entries {
            if holds(&*store, e) && store.remove(e.key()).is_some() {
                removed += 1;
            }
        }
        tracing::debug!(target: "view_map", removed, "entry view remove_all");
        Ok(removed > 0)
    }

    /// Remove every pair that `other` does not hold with the same value.
    pub fn retain_all<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> Result<bool>
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        let keep: HashMap<K, V> = other
            .into()
            .into_entries()?
            .to_vec()
            .into_iter()
            .map(Entry::into_parts)
            .collect();
        let removed = self
            .inner
            .map
            .borrow_mut()
            .retain(|k, v| keep.get(k) == Some(v));
        tracing::debug!(target: "view_map", removed, "entry view retain_all");
        Ok(removed > 0)
    }

    pub fn iter(&self) -> EntryIter<K, V, S> {
        EntryIter::new(Rc::clone(&self.inner))
    }

    pub fn to_vec(&self) -> Vec<Entry<K, V>> {
        self.inner
            .map
            .borrow()
            .iter()
            .map(|(_, k, v)| Entry::new(k.clone(), v.clone()))
            .collect()
    }

    pub fn to_array_in(&self, dest: Vec<Option<Entry<K, V>>>) -> Vec<Option<Entry<K, V>>> {
        fill_or_allocate(dest, self.to_vec())
    }

    pub fn equals<'a>(&self, other: impl Into<ViewRef<'a, K, V, S>>) -> bool
    where
        K: 'a,
        V: 'a,
        S: 'a,
    {
        match other.into().into_entries() {
            Ok(o) => self.len() == o.len() && self.contains_all(o).unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Sum over pairs of `hash(key) + hash(value)`; equals the map's `hash_code`.
    pub fn hash_code(&self) -> u64
    where
        V: Hash,
    {
        self.inner
            .map
            .borrow()
            .iter()
            .fold(0u64, |acc, (_, k, v)| {
                acc.wrapping_add(hash_of(k).wrapping_add(hash_of(v)))
            })
    }
}

impl<K, V, S> PartialEq for EntryView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<K, V, S> Hash for EntryView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Hash + Clone,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K, V, S> fmt::Debug for EntryView<K, V, S>
where
    K: fmt::Debug + Eq + Hash,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.map.borrow();
        f.debug_set()
            .entries(store.iter().map(|(_, k, v)| (k, v)))
            .finish()
    }
}

impl<'v, K, V, S> IntoIterator for &'v EntryView<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    type Item = Entry<K, V>;
    type IntoIter = EntryIter<K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
