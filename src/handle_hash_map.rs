//! HandleHashMap: the backing store every view reads and mutates.
//!
//! Pairs live in a generational `SlotMap`; a `hashbrown::HashTable` indexes
//! slot keys by the precomputed hash of their key. A `Handle` names one pair
//! for as long as it stays in the store and never resolves again afterwards,
//! even if the same key is put back.

use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    fn raw_handle(&self) -> DefaultKey {
        self.0
    }
}

#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
    hash: u64,
}

pub struct HandleHashMap<K, V, S = RandomState> {
    hasher: S,
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Slot<K, V>>,
}

impl<K, V> HandleHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V> Default for HandleHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of `(handle, key, value)` in slot order.
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Handle, &'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .next()
            .map(|(k, s)| (Handle::new(k), &s.key, &s.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V, S> HandleHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            index: HashTable::with_capacity(capacity),
            hasher,
            slots: SlotMap::with_capacity_and_key(capacity),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn find<Q>(&self, q: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.index
            .find(hash, |&k| {
                self.slots
                    .get(k)
                    .map(|s| s.key.borrow() == q)
                    .unwrap_or(false)
            })
            .map(|&k| Handle::new(k))
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).and_then(|h| self.handle_value(h))
    }

    /// Linear scan; values are not indexed.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.find_value(value).is_some()
    }

    /// First handle, in enumeration order, whose value equals `value`.
    pub fn find_value(&self, value: &V) -> Option<Handle>
    where
        V: PartialEq,
    {
        self.slots
            .iter()
            .find(|(_, s)| s.value == *value)
            .map(|(k, _)| Handle::new(k))
    }

    /// Insert or overwrite. On overwrite the stored key and its handle are
    /// kept and the previous value is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        match self.index.entry(
            hash,
            |&kk| self.slots.get(kk).map(|s| s.key == key).unwrap_or(false),
            |&kk| self.slots.get(kk).map(|s| s.hash).unwrap_or(0),
        ) {
            hashbrown::hash_table::Entry::Occupied(o) => {
                let slot = self.slots.get_mut(*o.get())?;
                Some(core::mem::replace(&mut slot.value, value))
            }
            hashbrown::hash_table::Entry::Vacant(v) => {
                let k = self.slots.insert(Slot { key, value, hash });
                let _ = v.insert(k);
                None
            }
        }
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.find(q)?;
        self.remove_handle(handle)
    }

    /// Remove the pair `handle` names. A stale handle is a no-op.
    pub fn remove_handle(&mut self, handle: Handle) -> Option<(K, V)> {
        let k = handle.raw_handle();
        let slot = self.slots.remove(k)?;
        if let Ok(occupied) = self.index.find_entry(slot.hash, |&kk| kk == k) {
            let _ = occupied.remove();
        }
        Some((slot.key, slot.value))
    }

    /// Keep only the pairs for which `keep` returns true; returns how many
    /// were removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<Handle> = self
            .iter()
            .filter(|&(_, k, v)| !keep(k, v))
            .map(|(h, _, _)| h)
            .collect();
        doomed
            .into_iter()
            .filter_map(|h| self.remove_handle(h))
            .count()
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
    }

    pub fn handle_key(&self, h: Handle) -> Option<&K> {
        self.slots.get(h.raw_handle()).map(|s| &s.key)
    }

    pub fn handle_value(&self, h: Handle) -> Option<&V> {
        self.slots.get(h.raw_handle()).map(|s| &s.value)
    }

    pub fn handle_pair(&self, h: Handle) -> Option<(&K, &V)> {
        self.slots.get(h.raw_handle()).map(|s| (&s.key, &s.value))
    }

    pub fn handles(&self) -> Vec<Handle> {
        self.slots.keys().map(Handle::new).collect()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
        }
    }
}
