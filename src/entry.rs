//! Detached key/value pairs handed out by the entry view.

use crate::error::{NullArgumentSnafu, Result, ViewKind};
use core::hash::{Hash, Hasher};
use snafu::OptionExt;
use std::collections::hash_map::DefaultHasher;

/// Deterministic per-element hash used by every `hash_code`. Sums of these
/// are order-independent, so equal collections agree regardless of layout.
pub(crate) fn hash_of<T: ?Sized + Hash>(t: &T) -> u64 {
    let mut h = DefaultHasher::new();
    t.hash(&mut h);
    h.finish()
}

/// A key/value pair. The key is fixed; the value can be replaced.
///
/// An `Entry` is a copy taken from the store at the moment it was yielded;
/// `set_value` changes this copy only. Write through the map with
/// [`MapAdapter::put`](crate::MapAdapter::put).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replace the value, returning the previous one.
    pub fn set_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Replace the value from a nullable slot; `None` is rejected and leaves
    /// the entry untouched.
    pub fn try_set_value(&mut self, value: Option<V>) -> Result<V> {
        let value = value.context(NullArgumentSnafu { what: "value" })?;
        Ok(self.set_value(value))
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Hash, V: Hash> Entry<K, V> {
    /// `hash(key) + hash(value)`, wrapping.
    pub fn hash_code(&self) -> u64 {
        hash_of(&self.key).wrapping_add(hash_of(&self.value))
    }
}

impl<K: Hash, V: Hash> Hash for Entry<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Build an entry from a nullable pair; either side missing is a
/// `NullArgument`.
impl<K, V> TryFrom<(Option<K>, Option<V>)> for Entry<K, V> {
    type Error = crate::error::Error;

    fn try_from((key, value): (Option<K>, Option<V>)) -> Result<Self> {
        let key = key.context(NullArgumentSnafu { what: "key" })?;
        let value = value.context(NullArgumentSnafu { what: "value" })?;
        Ok(Self::new(key, value))
    }
}

/// An element of any of the three views, tagged with the view it belongs to.
/// Entry-view membership tests accept this so raw keys and values can be
/// told apart from entries and rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Element<K, V> {
    Key(K),
    Value(V),
    Entry(Entry<K, V>),
}

impl<K, V> Element<K, V> {
    pub fn kind(&self) -> ViewKind {
        match self {
            Element::Key(_) => ViewKind::Keys,
            Element::Value(_) => ViewKind::Values,
            Element::Entry(_) => ViewKind::Entries,
        }
    }
}

impl<K, V> From<Entry<K, V>> for Element<K, V> {
    fn from(e: Entry<K, V>) -> Self {
        Element::Entry(e)
    }
}

impl<K, V> From<(K, V)> for Element<K, V> {
    fn from(pair: (K, V)) -> Self {
        Element::Entry(pair.into())
    }
}
