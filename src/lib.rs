//! view-map: a hash map with live key, value and entry views whose
//! iterators can remove the element they last yielded.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: every view reads and mutates the map's own storage, so a change
//!   made through any handle is visible through all of them at once.
//! - Layers:
//!   - HandleHashMap<K, V, S>: structural store; pairs live in a
//!     generational slot map indexed by precomputed hash. Lookups return
//!     stable `Handle`s that go stale when their pair is removed.
//!   - MapAdapter<K, V, S>: public map API over one shared
//!     `Rc<RefCell<HandleHashMap>>`.
//!   - KeyView / ValueView / EntryView: live collection views holding a
//!     clone of the same `Rc`; each hands out a removal-capable iterator.
//!
//! Constraints
//! - Single-threaded: the shared store is `Rc<RefCell<..>>`, so neither the
//!   map nor its views are `Send`/`Sync`.
//! - No borrow escapes a call: keys, values and entries are returned as
//!   clones, which keeps every `RefCell` borrow local to one method.
//! - Views never insert. `add`/`add_all` report `UnsupportedOperation`.
//!
//! Iteration
//! - An iterator snapshots the store's handles when created and resolves
//!   each handle on `next`. Pairs removed elsewhere are skipped; pairs put
//!   after the snapshot are not visited; overwritten values are read in
//!   their current form.
//! - `remove` on an iterator deletes by handle. Repeating it, or calling it
//!   after the pair was removed some other way, finds nothing and is a
//!   no-op; a key that was removed and put back is never affected.
//!
//! Cross-view arguments
//! - `contains_all`, `remove_all`, `retain_all` and `equals` accept a
//!   [`ViewRef`] built from any view. A view of the wrong kind is rejected
//!   with `TypeMismatch` before the store is touched. The argument is
//!   copied out before the receiver mutates, so passing a view of the same
//!   map (or the receiver itself) is well defined.
//!
//! Hashing
//! - `hash_code` on the map and its views is a wrapping sum of per-element
//!   hashes, so it does not depend on enumeration order.
//!
//! Notes and non-goals
//! - No thread safety, no ordering guarantees, no serialization.
//! - `Entry` values are detached copies; `Entry::set_value` does not write
//!   through to the map.

mod entry;
mod entry_view;
pub mod error;
pub mod handle_hash_map;
mod handle_hash_map_proptest;
mod iter;
mod key_view;
mod map_adapter;
mod value_view;
mod view;

// Public surface
pub use entry::{Element, Entry};
pub use entry_view::EntryView;
pub use error::{Error, Result, ViewKind};
pub use iter::{EntryIter, KeyIter, ValueIter};
pub use key_view::KeyView;
pub use map_adapter::MapAdapter;
pub use value_view::ValueView;
pub use view::ViewRef;
