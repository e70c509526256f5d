use std::collections::BTreeSet;
use view_map::{Element, Entry, Error, MapAdapter, ViewKind, ViewRef};

fn sample() -> MapAdapter<i32, &'static str> {
    let m = MapAdapter::new();
    m.put(1, "one");
    m.put(2, "two");
    m.put(3, "three");
    m.put(4, "two");
    m
}

fn keys_of(m: &MapAdapter<i32, &'static str>) -> BTreeSet<i32> {
    m.key_set().to_vec().into_iter().collect()
}

// Test: insertion through any view.
// Verifies: add/add_all fail with UnsupportedOperation and leave the map alone.
#[test]
fn views_reject_insertion() {
    let m = sample();
    let (keys, values, entries) = (m.key_set(), m.values(), m.entry_set());
    assert_eq!(
        keys.add(9),
        Err(Error::UnsupportedOperation { operation: "add" })
    );
    assert!(matches!(
        values.add("nine"),
        Err(Error::UnsupportedOperation { .. })
    ));
    assert!(matches!(
        entries.add((9, "nine")),
        Err(Error::UnsupportedOperation { .. })
    ));
    assert_eq!(
        keys.add_all(&keys),
        Err(Error::UnsupportedOperation { operation: "add_all" })
    );
    assert!(values.add_all(&values).is_err());
    assert!(entries.add_all(&entries).is_err());
    assert_eq!(m.len(), 4);
}

// Test: removal through each view propagates.
// Assumes: all three views share the map's store.
// Verifies: a pair removed via one view disappears from the map and the others.
#[test]
fn removal_through_any_view_is_shared() {
    let m = sample();
    let (keys, values, entries) = (m.key_set(), m.values(), m.entry_set());

    assert!(keys.remove(&1));
    assert!(!m.contains_key(&1));
    assert!(!values.contains(&"one"));
    assert_eq!(entries.contains((1, "one")), Ok(false));

    assert_eq!(entries.remove((3, "three")), Ok(true));
    assert!(!keys.contains(&3));
    assert!(!values.contains(&"three"));

    assert!(values.remove(&"two"));
    assert!(m.is_empty());
    assert_eq!(keys.len(), 0);
    assert_eq!(entries.len(), 0);
    assert!(!values.contains(&"two"));
}

// Test: entry membership is exact.
// Verifies: the key must be stored with exactly the given value.
#[test]
fn entry_view_requires_matching_value() {
    let m = sample();
    let entries = m.entry_set();
    assert_eq!(entries.contains(Entry::new(2, "two")), Ok(true));
    assert_eq!(entries.contains((2, "three")), Ok(false));
    assert_eq!(entries.remove((2, "three")), Ok(false));
    assert_eq!(m.get(&2), Some("two"));
}

// Test: entry view element kinds.
// Verifies: a bare key or value is a TypeMismatch, not a miss.
#[test]
fn entry_view_rejects_bare_keys_and_values() {
    let m = sample();
    let entries = m.entry_set();
    assert_eq!(
        entries.contains(Element::Key(1)),
        Err(Error::TypeMismatch {
            expected: ViewKind::Entries,
            found: ViewKind::Keys
        })
    );
    assert_eq!(
        entries.remove(Element::Value("one")),
        Err(Error::TypeMismatch {
            expected: ViewKind::Entries,
            found: ViewKind::Values
        })
    );
    assert_eq!(m.len(), 4);
}

// Test: cross-view operations with a view of another kind.
// Assumes: the argument kind is checked before the store is touched.
// Verifies: TypeMismatch from every bulk operation; map unchanged.
#[test]
fn bulk_operations_require_same_kind() {
    let m = sample();
    let (keys, values, entries) = (m.key_set(), m.values(), m.entry_set());
    let mismatch = |expected, found| Error::TypeMismatch { expected, found };

    assert_eq!(
        keys.contains_all(&values),
        Err(mismatch(ViewKind::Keys, ViewKind::Values))
    );
    assert_eq!(
        keys.remove_all(&entries),
        Err(mismatch(ViewKind::Keys, ViewKind::Entries))
    );
    assert_eq!(
        values.retain_all(&keys),
        Err(mismatch(ViewKind::Values, ViewKind::Keys))
    );
    assert_eq!(
        entries.retain_all(&keys),
        Err(mismatch(ViewKind::Entries, ViewKind::Keys))
    );
    assert_eq!(
        entries.contains_all(ViewRef::from(&values)),
        Err(mismatch(ViewKind::Entries, ViewKind::Values))
    );
    assert_eq!(m.len(), 4);
}

// Test: key-view bulk removal across maps.
// Verifies: remove_all deletes shared keys only and reports whether anything changed.
#[test]
fn key_remove_all() {
    let m = sample();
    let other = MapAdapter::new();
    other.put(2, "x");
    other.put(9, "y");
    let keys = m.key_set();
    assert_eq!(keys.remove_all(&other.key_set()), Ok(true));
    assert_eq!(keys_of(&m), BTreeSet::from([1, 3, 4]));
    assert_eq!(keys.remove_all(&other.key_set()), Ok(false));
}

// Test: key-view retain_all.
// Assumes: retention is in place on the shared store.
// Verifies: views taken before the call see the result; empty argument clears.
#[test]
fn key_retain_all_is_visible_everywhere() {
    let m = sample();
    let values = m.values();
    let keep = MapAdapter::new();
    keep.put(1, "");
    keep.put(4, "");
    assert_eq!(m.key_set().retain_all(&keep.key_set()), Ok(true));
    assert_eq!(keys_of(&m), BTreeSet::from([1, 4]));
    assert_eq!(values.len(), 2);
    assert_eq!(m.key_set().retain_all(&keep.key_set()), Ok(false));

    let nothing: MapAdapter<i32, &str> = MapAdapter::new();
    assert_eq!(m.key_set().retain_all(&nothing.key_set()), Ok(true));
    assert!(m.is_empty());
}

// Test: value-view bulk operations.
// Assumes: values are not unique.
// Verifies: remove_all/retain_all act on every pair holding a matching value.
#[test]
fn value_bulk_operations_cover_duplicates() {
    let m = sample();
    let twos = MapAdapter::new();
    twos.put(0, "two");
    assert_eq!(m.values().contains_all(&twos.values()), Ok(true));
    assert_eq!(m.values().remove_all(&twos.values()), Ok(true));
    assert_eq!(keys_of(&m), BTreeSet::from([1, 3]));

    let m = sample();
    assert_eq!(m.values().retain_all(&twos.values()), Ok(true));
    assert_eq!(keys_of(&m), BTreeSet::from([2, 4]));
}

// Test: entry-view bulk operations.
// Verifies: only exact pairs are matched; a larger argument never satisfies contains_all.
#[test]
fn entry_bulk_operations_match_pairs() {
    let m = sample();
    let pattern = MapAdapter::new();
    pattern.put(1, "one");
    pattern.put(2, "not two");
    assert_eq!(m.entry_set().contains_all(&pattern.entry_set()), Ok(false));
    assert_eq!(m.entry_set().remove_all(&pattern.entry_set()), Ok(true));
    assert_eq!(keys_of(&m), BTreeSet::from([2, 3, 4]));

    assert_eq!(m.entry_set().retain_all(&pattern.entry_set()), Ok(true));
    assert!(m.is_empty());

    let small = MapAdapter::new();
    small.put(1, "one");
    let big = sample();
    assert_eq!(small.entry_set().contains_all(&big.entry_set()), Ok(false));
    assert_eq!(big.entry_set().contains_all(&small.entry_set()), Ok(true));
}

// Test: a view passed to its own bulk operation.
// Verifies: no borrow conflict; retain against itself keeps everything, remove clears.
#[test]
fn bulk_operations_against_self() {
    let m = sample();
    let keys = m.key_set();
    assert_eq!(keys.contains_all(&keys), Ok(true));
    assert_eq!(keys.retain_all(&keys), Ok(false));
    assert_eq!(m.len(), 4);
    let entries = m.entry_set();
    assert_eq!(entries.remove_all(&entries), Ok(true));
    assert!(m.is_empty());
}

// Test: array materialization.
// Verifies: a short destination is replaced; a long one is filled then None-padded.
#[test]
fn to_array_in_reuses_or_allocates() {
    let m = sample();
    let keys = m.key_set();
    let order = keys.to_vec();

    let fresh = keys.to_array_in(Vec::new());
    assert_eq!(fresh.len(), 4);
    assert_eq!(fresh, order.iter().copied().map(Some).collect::<Vec<_>>());

    let padded = m.values().to_array_in(vec![Some("stale"); 6]);
    assert_eq!(padded.len(), 6);
    assert!(padded[..4].iter().all(Option::is_some));
    assert_eq!(&padded[4..], &[None, None]);

    let entries = m.entry_set().to_array_in(vec![None; 4]);
    let got: Vec<i32> = entries.iter().flatten().map(|e| *e.key()).collect();
    assert_eq!(got, order);
}

// Test: view equality and hashing.
// Verifies: same-kind views over equal maps are equal with equal hash codes;
// views of different kinds are never equal.
#[test]
fn view_equality_and_hash_code() {
    let a = sample();
    let b: MapAdapter<i32, &str> = MapAdapter::new();
    for k in [4, 3, 2, 1] {
        b.put(k, a.get(&k).expect("present"));
    }
    assert_eq!(a.key_set(), b.key_set());
    assert_eq!(a.values(), b.values());
    assert_eq!(a.entry_set(), b.entry_set());
    assert_eq!(a.key_set().hash_code(), b.key_set().hash_code());
    assert_eq!(a.values().hash_code(), b.values().hash_code());
    assert_eq!(a.entry_set().hash_code(), a.hash_code());

    assert!(!a.key_set().equals(&a.values()));
    assert!(!a.values().equals(&a.entry_set()));
    assert!(!a.entry_set().equals(&a.key_set()));

    b.remove(&1);
    assert_ne!(a.key_set(), b.key_set());
    assert_ne!(a.entry_set(), b.entry_set());
}

// Test: clear through a view.
// Verifies: every view and the map are emptied.
#[test]
fn clear_through_value_view() {
    let m = sample();
    let keys = m.key_set();
    m.values().clear();
    assert!(m.is_empty());
    assert!(keys.is_empty());
    assert!(m.entry_set().is_empty());
}

// Test: Debug rendering of views.
#[test]
fn debug_formats() {
    let m = MapAdapter::new();
    m.put(1, "a");
    assert_eq!(format!("{:?}", m.key_set()), "{1}");
    assert_eq!(format!("{:?}", m.values()), "[\"a\"]");
    assert_eq!(format!("{:?}", m.entry_set()), "{(1, \"a\")}");
}

// Test: nullable entry construction.
// Verifies: a missing side is a NullArgument.
#[test]
fn nullable_entries() {
    let e: Result<Entry<i32, &str>, Error> = Entry::try_from((None, Some("v")));
    assert_eq!(e, Err(Error::NullArgument { what: "key" }));
    let mut e = Entry::<i32, &str>::try_from((Some(1), Some("v"))).expect("both present");
    assert_eq!(e.try_set_value(None), Err(Error::NullArgument { what: "value" }));
}
