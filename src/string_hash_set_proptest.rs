#![cfg(test)]

// Property tests for StringHashSet kept inside the crate so they can inspect
// bucket layout and cursor state directly.

use crate::cursor::{Cursor, IterError};
use crate::hash::{KeyHasher, Polynomial31};
use crate::string_hash_set::{StringHashSet, MAX_LOAD_FACTOR};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashSet};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize),
    AddAll(Vec<usize>),
    Remove(usize),
    Contains(String),
    Promote(usize),
    Clear,
    Iterate,
    OpenCursor,
    StepCursor,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => idx.clone().prop_map(OpI::Add),
            1 => proptest::collection::vec(idx.clone(), 0..6).prop_map(OpI::AddAll),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => idx.clone().prop_map(OpI::Promote),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::OpenCursor),
            3 => Just(OpI::StepCursor),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// An outstanding cursor plus what the model knows about it.
struct Tracked {
    cursor: Cursor,
    stale: bool,
    seen: BTreeSet<String>,
}

// State-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - add/remove/add_all return values match the model; len/is_empty parity.
// - Non-mutating operations leave the generation untouched.
// - Load factor never exceeds MAX_LOAD_FACTOR; clear restores the default capacity.
// - A cursor with no intervening mutation yields each live key once, then Exhausted.
// - Any mutation after a cursor is opened makes its next step fail.
fn run_scenario<H: KeyHasher>(
    mut sut: StringHashSet<H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<String> = HashSet::new();
    let mut tracked: Option<Tracked> = None;

    for op in ops {
        let before = sut.generation();
        let mut mutated = false;
        match op {
            OpI::Add(i) => {
                let k = &pool[i];
                let changed = sut.add(k.as_str());
                prop_assert_eq!(changed, model.insert(k.clone()));
                mutated = changed;
            }
            OpI::AddAll(is) => {
                let keys: Vec<&str> = is.iter().map(|&i| pool[i].as_str()).collect();
                let changed = sut.add_all(keys.iter().copied());
                let mut model_changed = false;
                for k in keys {
                    model_changed |= model.insert(k.to_string());
                }
                prop_assert_eq!(changed, model_changed);
                mutated = changed;
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k));
                prop_assert!(!sut.contains(k));
                mutated = removed;
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains(&s));
            }
            OpI::Promote(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.promote(k), model.contains(k));
                if model.contains(k) {
                    prop_assert_eq!(sut.buckets()[sut.index_of(k)].front(), Some(k.as_str()));
                }
                mutated = sut.generation() != before;
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), crate::DEFAULT_CAPACITY);
                mutated = true;
            }
            OpI::Iterate => {
                let keys: Vec<&str> = sut.iter().collect();
                let unique: BTreeSet<&str> = keys.iter().copied().collect();
                prop_assert_eq!(keys.len(), unique.len(), "iteration yields duplicates");
                let m_keys: BTreeSet<&str> = model.iter().map(String::as_str).collect();
                prop_assert_eq!(unique, m_keys);
            }
            OpI::OpenCursor => {
                tracked = Some(Tracked {
                    cursor: sut.cursor(),
                    stale: false,
                    seen: BTreeSet::new(),
                });
            }
            OpI::StepCursor => {
                if let Some(t) = tracked.as_mut() {
                    match t.cursor.next_key(&sut) {
                        Ok(key) => {
                            prop_assert!(!t.stale, "stale cursor yielded {:?}", key);
                            prop_assert!(model.contains(key));
                            prop_assert!(t.seen.insert(key.to_string()), "cursor repeated {:?}", key);
                        }
                        Err(IterError::Exhausted) => {
                            prop_assert!(!t.stale);
                            prop_assert_eq!(t.seen.len(), model.len());
                        }
                        Err(IterError::ConcurrentModification) => prop_assert!(t.stale),
                        Err(IterError::WrongSet) => prop_assert!(false, "cursor lost its owner"),
                    }
                }
            }
        }

        if mutated {
            prop_assert!(sut.generation() > before);
            if let Some(t) = tracked.as_mut() {
                t.stale = true;
            }
        } else {
            prop_assert_eq!(sut.generation(), before);
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.len() <= MAX_LOAD_FACTOR * sut.capacity());
        let stored: usize = sut.buckets().iter().map(|c| c.len()).sum();
        prop_assert_eq!(stored, sut.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(StringHashSet::with_hasher(Polynomial31), &pool, ops)?;
    }
}

// Worst-case distribution: every key hashes to the same bucket.
#[derive(Clone, Default)]
struct ConstHasher;

impl KeyHasher for ConstHasher {
    fn hash_key(&self, _key: &str) -> i32 {
        -7
    }
}

// Same state-machine invariants under constant hashing, so every lookup and
// removal has to resolve by equality inside one long chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(StringHashSet::with_hasher(ConstHasher), &pool, ops)?;
    }
}
