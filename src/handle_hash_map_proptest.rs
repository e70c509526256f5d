#![cfg(test)]

// Property tests for HandleHashMap kept inside the crate so they can reach
// handles and the store directly.

use crate::handle_hash_map::{Handle, HandleHashMap};
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length. Values are drawn from a
// small range so value lookups and duplicate values actually occur.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i8),
    Remove(usize),
    RemoveHandle(usize),
    Find(usize),
    Contains(String),
    ContainsValue(i8),
    RetainEven,
    Clear,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), -4i8..4).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::RemoveHandle),
            1 => idx.clone().prop_map(OpI::Find),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (-4i8..4).prop_map(OpI::ContainsValue),
            1 => Just(OpI::RetainEven),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Shared driver so the default-hasher and colliding-hasher properties run the
// exact same checks.
fn run_state_machine<S: BuildHasher>(
    mut sut: HandleHashMap<Key, i8, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i8> = HashMap::new();
    let mut live: HashMap<Key, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                let h = sut.find(&k).expect("put key is present");
                if let Some(&old) = live.get(&k) {
                    prop_assert_eq!(h, old, "overwrite must keep the handle");
                }
                live.insert(k, h);
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                let got = sut.remove(&k);
                let expected = model.remove(&k).map(|v| (k.clone(), v));
                prop_assert_eq!(got, expected);
                if let Some(h) = live.remove(&k) {
                    stale.push(h);
                }
            }
            OpI::RemoveHandle(i) => {
                let k = key_from(pool, i);
                if let Some(h) = live.remove(&k) {
                    let (kk, vv) = sut.remove_handle(h).expect("live handle removes");
                    prop_assert!(kk == k);
                    prop_assert_eq!(Some(vv), model.remove(&k));
                    stale.push(h);
                } else if let Some(&h) = stale.last() {
                    prop_assert!(sut.remove_handle(h).is_none(), "stale handle must be a no-op");
                }
            }
            OpI::Find(i) => {
                let k = key_from(pool, i);
                let s = sut.find(&k);
                prop_assert_eq!(s.is_some(), model.contains_key(&k));
                if let Some(h) = s {
                    prop_assert_eq!(Some(&h), live.get(&k));
                    prop_assert_eq!(sut.handle_key(h), Some(&k));
                    prop_assert_eq!(sut.handle_value(h), model.get(&k));
                }
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::ContainsValue(v) => {
                prop_assert_eq!(sut.contains_value(&v), model.values().any(|mv| *mv == v));
                if let Some(h) = sut.find_value(&v) {
                    prop_assert_eq!(sut.handle_value(h), Some(&v));
                }
            }
            OpI::RetainEven => {
                let before = model.len();
                model.retain(|_, v| *v % 2 == 0);
                let removed = sut.retain(|_, v| *v % 2 == 0);
                prop_assert_eq!(removed, before - model.len());
                let dropped: Vec<Key> = live
                    .keys()
                    .filter(|k| !model.contains_key(*k))
                    .cloned()
                    .collect();
                for k in dropped {
                    if let Some(h) = live.remove(&k) {
                        stale.push(h);
                    }
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                stale.extend(live.drain().map(|(_, h)| h));
            }
            OpI::Iterate => {
                let s_pairs: BTreeSet<_> = sut.iter().map(|(_, k, v)| (k.clone(), *v)).collect();
                let m_pairs: BTreeSet<_> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s_pairs, m_pairs);
                let handles: HashSet<Handle> = sut.handles().into_iter().collect();
                prop_assert_eq!(handles.len(), model.len());
            }
        }

        // Post-conditions after each op
        // 1) All stale handles must not resolve
        for &h in &stale {
            prop_assert!(sut.handle_pair(h).is_none());
        }
        // 2) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the previous value and keeps the handle on overwrite.
// - `find`/`contains_key` parity and handle stability for live pairs.
// - `remove`/`remove_handle` return the owned `(K,V)` matching the model.
// - `retain`/`clear` report and remove exactly what the model drops.
// - Stale handles never resolve; `len`/`is_empty` parity after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(HandleHashMap::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher).
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(HandleHashMap::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
