//! Tagged references used by cross-view operations.
//!
//! `contains_all`, `remove_all`, `retain_all` and `equals` accept any of the
//! three views; the receiver checks the tag and rejects a different kind with
//! `TypeMismatch` before touching the store.

use crate::entry_view::EntryView;
use crate::error::{Result, TypeMismatchSnafu, ViewKind};
use crate::key_view::KeyView;
use crate::value_view::ValueView;
use std::collections::hash_map::RandomState;

pub enum ViewRef<'a, K, V, S = RandomState> {
    Keys(&'a KeyView<K, V, S>),
    Values(&'a ValueView<K, V, S>),
    Entries(&'a EntryView<K, V, S>),
}

impl<'a, K, V, S> ViewRef<'a, K, V, S> {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewRef::Keys(_) => ViewKind::Keys,
            ViewRef::Values(_) => ViewKind::Values,
            ViewRef::Entries(_) => ViewKind::Entries,
        }
    }

    pub(crate) fn into_keys(self) -> Result<&'a KeyView<K, V, S>> {
        match self {
            ViewRef::Keys(v) => Ok(v),
            other => mismatch(ViewKind::Keys, other.kind()),
        }
    }

    pub(crate) fn into_values(self) -> Result<&'a ValueView<K, V, S>> {
        match self {
            ViewRef::Values(v) => Ok(v),
            other => mismatch(ViewKind::Values, other.kind()),
        }
    }

    pub(crate) fn into_entries(self) -> Result<&'a EntryView<K, V, S>> {
        match self {
            ViewRef::Entries(v) => Ok(v),
            other => mismatch(ViewKind::Entries, other.kind()),
        }
    }
}

fn mismatch<T>(expected: ViewKind, found: ViewKind) -> Result<T> {
    TypeMismatchSnafu { expected, found }.fail()
}

// Manual impls: derives would demand `K: Clone` etc. for a pair of references.
impl<'a, K, V, S> Clone for ViewRef<'a, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V, S> Copy for ViewRef<'a, K, V, S> {}

impl<'a, K, V, S> From<&'a KeyView<K, V, S>> for ViewRef<'a, K, V, S> {
    fn from(v: &'a KeyView<K, V, S>) -> Self {
        ViewRef::Keys(v)
    }
}

impl<'a, K, V, S> From<&'a ValueView<K, V, S>> for ViewRef<'a, K, V, S> {
    fn from(v: &'a ValueView<K, V, S>) -> Self {
        ViewRef::Values(v)
    }
}

impl<'a, K, V, S> From<&'a EntryView<K, V, S>> for ViewRef<'a, K, V, S> {
    fn from(v: &'a EntryView<K, V, S>) -> Self {
        ViewRef::Entries(v)
    }
}
