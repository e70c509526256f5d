use crate::entry::hash_of;
use crate::entry_view::EntryView;
use crate::error::{InvalidArgumentSnafu, Result};
use crate::handle_hash_map::HandleHashMap;
use crate::key_view::KeyView;
use crate::value_view::ValueView;
use core::any::Any;
use core::borrow::Borrow;
use core::cell::RefCell;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use snafu::OptionExt;
use std::collections::hash_map::RandomState;
use std::rc::Rc;

/// The single store shared by a map and every view taken from it.
pub(crate) struct Inner<K, V, S> {
    pub(crate) map: RefCell<HandleHashMap<K, V, S>>, // single-threaded interior mutability
}

impl<K, V, S> Inner<K, V, S> {
    fn new(map: HandleHashMap<K, V, S>) -> Rc<Self> {
        Rc::new(Inner {
            map: RefCell::new(map),
        })
    }
}

/// A hash map with live key, value and entry views.
///
/// Views returned by [`key_set`](Self::key_set), [`values`](Self::values)
/// and [`entry_set`](Self::entry_set) hold the same store as the map; a
/// removal through any of them is immediately visible everywhere. Keys and
/// values are handed out as clones.
pub struct MapAdapter<K, V, S = RandomState> {
    inner: Rc<Inner<K, V, S>>,
}

impl<K, V> MapAdapter<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }

    /// Like [`with_capacity`](Self::with_capacity), for signed or otherwise
    /// unchecked hints. A hint that does not fit `usize` (e.g. a negative
    /// one) is an `InvalidArgument`.
    pub fn try_with_capacity<C>(capacity: C) -> Result<Self>
    where
        C: TryInto<usize> + Copy + fmt::Display,
    {
        let checked = capacity
            .try_into()
            .ok()
            .with_context(|| InvalidArgumentSnafu {
                details: format!("capacity must be non-negative, got {capacity}"),
            })?;
        Ok(Self::with_capacity(checked))
    }
}

impl<K, V> Default for MapAdapter<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> MapAdapter<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            inner: Inner::new(HandleHashMap::with_hasher(hasher)),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            inner: Inner::new(HandleHashMap::with_capacity_and_hasher(capacity, hasher)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.map.borrow().is_empty()
    }

    /// Insert or overwrite, returning the previous value for `key`.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.map.borrow_mut().put(key, value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.map.borrow().get(key).cloned()
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.map.borrow_mut().remove(key).map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.map.borrow().contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.inner.map.borrow().contains_value(value)
    }

    /// Copy every pair of `other` into `self`, overwriting on key collision.
    /// `self` is not cleared first; `other` may be `self`.
    pub fn put_all<S2>(&self, other: &MapAdapter<K, V, S2>)
    where
        S2: BuildHasher,
    {
        let pairs: Vec<(K, V)> = other
            .inner
            .map
            .borrow()
            .iter()
            .map(|(_, k, v)| (k.clone(), v.clone()))
            .collect();
        let copied = pairs.len();
        let mut store = self.inner.map.borrow_mut();
        for (k, v) in pairs {
            store.put(k, v);
        }
        tracing::debug!(target: "view_map", copied, len = store.len(), "put_all");
    }

    pub fn clear(&self) {
        let mut store = self.inner.map.borrow_mut();
        let removed = store.len();
        store.clear();
        tracing::trace!(target: "view_map", removed, "clear");
    }

    /// A fresh live view over the keys.
    pub fn key_set(&self) -> KeyView<K, V, S> {
        KeyView::new(Rc::clone(&self.inner))
    }

    /// A fresh live view over the values; duplicates appear once per pair.
    pub fn values(&self) -> ValueView<K, V, S> {
        ValueView::new(Rc::clone(&self.inner))
    }

    /// A fresh live view over the pairs.
    pub fn entry_set(&self) -> EntryView<K, V, S> {
        EntryView::new(Rc::clone(&self.inner))
    }

    /// Dynamic equality: `false` unless `other` is a map of the same type
    /// with equal contents.
    pub fn equals(&self, other: &dyn Any) -> bool
    where
        K: 'static,
        V: 'static,
        S: 'static,
    {
        other.downcast_ref::<Self>().is_some_and(|m| self == m)
    }

    /// Sum over all pairs of `hash(key) + hash(value)`, wrapping.
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

/// Equal iff both hold the same pairs.
///
/// A larger `self` is rejected up front; the reverse bound is left to the
/// entry-view comparison, which checks sizes itself.
impl<K, V, S> PartialEq for MapAdapter<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() > other.len() {
            return false;
        }
        self.entry_set() == other.entry_set()
    }
}

impl<K, V, S> Eq for MapAdapter<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Eq + Clone,
    S: BuildHasher,
{
}

impl<K, V, S> Hash for MapAdapter<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Hash + Clone,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K, V, S> fmt::Debug for MapAdapter<K, V, S>
where
    K: fmt::Debug + Eq + Hash,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.map.borrow();
        f.debug_map()
            .entries(store.iter().map(|(_, k, v)| (k, v)))
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for MapAdapter<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for MapAdapter<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        Extend::extend(&mut &*self, iter)
    }
}

impl<K, V, S> Extend<(K, V)> for &MapAdapter<K, V, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let mut store = self.inner.map.borrow_mut();
        for (k, v) in iter {
            store.put(k, v);
        }
    }
}
