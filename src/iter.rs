//! Removal-capable iterators over the three views.
//!
//! Each iterator snapshots the store's handles when it is created and walks
//! that snapshot; the element itself is read from the store when `next` is
//! called, so a value overwritten since the snapshot is seen in its new form.
//! A pair removed through some other path is skipped rather than yielded.

use crate::entry::Entry;
use crate::error::{IllegalIteratorStateSnafu, NoSuchElementSnafu, Result};
use crate::handle_hash_map::Handle;
use crate::map_adapter::Inner;
use core::cell::Cell;
use core::hash::{BuildHasher, Hash};
use snafu::OptionExt;
use std::collections::hash_map::RandomState;
use std::rc::Rc;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Fresh,
    Advancing,
    Exhausted,
}

/// Shared cursor: snapshot position plus the handle of the last yielded pair.
/// `last` doubles as the has-yielded flag and is never cleared, so repeated
/// `remove` calls re-issue a removal that finds nothing.
///
/// `pos` only moves forward. Handles behind it are either yielded or dead,
/// and a dead handle never resolves again.
struct Cursor<K, V, S> {
    inner: Rc<Inner<K, V, S>>,
    snapshot: Vec<Handle>,
    pos: Cell<usize>,
    last: Option<Handle>,
    state: State,
}

impl<K, V, S> Cursor<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn new(inner: Rc<Inner<K, V, S>>) -> Self {
        let snapshot = inner.map.borrow().handles();
        Self {
            inner,
            snapshot,
            pos: Cell::new(0),
            last: None,
            state: State::Fresh,
        }
    }

    /// Skips dead handles so that a `has_next` loop stays linear overall.
    fn has_next(&self) -> bool {
        if self.state == State::Exhausted {
            return false;
        }
        let store = self.inner.map.borrow();
        let mut pos = self.pos.get();
        while let Some(&h) = self.snapshot.get(pos) {
            if store.handle_pair(h).is_some() {
                break;
            }
            pos += 1;
        }
        self.pos.set(pos);
        pos < self.snapshot.len()
    }

    fn advance<T, F>(&mut self, project: F) -> Result<T>
    where
        F: FnOnce(&K, &V) -> T,
    {
        let store = self.inner.map.borrow();
        while let Some(&h) = self.snapshot.get(self.pos.get()) {
            self.pos.set(self.pos.get() + 1);
            if let Some((k, v)) = store.handle_pair(h) {
                self.last = Some(h);
                self.state = State::Advancing;
                return Ok(project(k, v));
            }
        }
        self.state = State::Exhausted;
        NoSuchElementSnafu.fail()
    }

    fn remove(&mut self) -> Result<()> {
        let h = self.last.context(IllegalIteratorStateSnafu)?;
        let removed = self.inner.map.borrow_mut().remove_handle(h).is_some();
        tracing::trace!(target: "view_map", removed, "iterator remove");
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.snapshot.len() - self.pos.get()
    }
}

macro_rules! view_iter {
    ($(#[$doc:meta])* $name:ident, $item:ty, |$k:ident, $v:ident| $project:expr) => {
        $(#[$doc])*
        pub struct $name<K, V, S = RandomState> {
            cursor: Cursor<K, V, S>,
        }

        impl<K, V, S> $name<K, V, S>
        where
            K: Eq + Hash + Clone,
            V: Clone,
            S: BuildHasher,
        {
            pub(crate) fn new(inner: Rc<Inner<K, V, S>>) -> Self {
                Self {
                    cursor: Cursor::new(inner),
                }
            }

            /// True while the snapshot still names a live pair.
            pub fn has_next(&self) -> bool {
                self.cursor.has_next()
            }

            /// Advance, failing with `NoSuchElement` once the snapshot is used up.
            pub fn try_next(&mut self) -> Result<$item> {
                self.cursor.advance(|$k, $v| $project)
            }

            /// Remove the last yielded pair from the map. Fails with
            /// `IllegalIteratorState` before the first successful advance.
            pub fn remove(&mut self) -> Result<()> {
                self.cursor.remove()
            }
        }

        impl<K, V, S> Iterator for $name<K, V, S>
        where
            K: Eq + Hash + Clone,
            V: Clone,
            S: BuildHasher,
        {
            type Item = $item;

            fn next(&mut self) -> Option<Self::Item> {
                self.try_next().ok()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                (0, Some(self.cursor.remaining()))
            }
        }
    };
}

view_iter!(
    /// Iterator over the keys of a [`KeyView`](crate::KeyView).
    KeyIter,
    K,
    |k, _v| k.clone()
);

view_iter!(
    /// Iterator over the values of a [`ValueView`](crate::ValueView).
    ValueIter,
    V,
    |_k, v| v.clone()
);

view_iter!(
    /// Iterator over detached [`Entry`] copies of an [`EntryView`](crate::EntryView).
    EntryIter,
    Entry<K, V>,
    |k, v| Entry::new(k.clone(), v.clone())
);
