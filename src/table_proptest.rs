#![cfg(test)]

// Property tests for Table kept inside the crate so they can inspect the
// tombstone counter alongside the public API.

use crate::table::{Table, LOAD_FACTOR_THRESHOLD};
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, String),
    Remove(usize),
    Take(usize),
    Lookup(usize),
    LookupRaw(String),
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=12, proptest::collection::vec("[a-z]{0,5}", 1..=24)).prop_flat_map(
        |(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                3 => (idx.clone(), "[a-z0-9]{0,4}").prop_map(|(i, v)| OpI::Insert(i, v)),
                2 => idx.clone().prop_map(OpI::Remove),
                1 => idx.clone().prop_map(OpI::Take),
                2 => idx.clone().prop_map(OpI::Lookup),
                1 => "[a-z]{0,5}".prop_map(OpI::LookupRaw),
            ];
            proptest::collection::vec(op, 1..120)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

fn run_state_machine<S: BuildHasher>(
    mut sut: Table<S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, String> = HashMap::new();

    for op in ops {
        let capacity_before = sut.capacity();
        let len_before = sut.len();
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k.as_str(), v.as_str()).expect("insert");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                if sut.len() == len_before {
                    prop_assert_eq!(sut.capacity(), capacity_before, "overwrite must not grow");
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let removed = sut.remove(k);
                prop_assert_eq!(removed, model.remove(k).is_some());
                if !removed {
                    prop_assert_eq!(sut.len(), len_before);
                }
            }
            OpI::Take(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.take(k), model.remove(k));
            }
            OpI::Lookup(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.lookup(k), model.get(k).map(String::as_str));
            }
            OpI::LookupRaw(s) => {
                prop_assert_eq!(sut.lookup(&s), model.get(&s).map(String::as_str));
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Load stays below the threshold and capacity only ever doubles
        prop_assert!(sut.load_factor() < LOAD_FACTOR_THRESHOLD);
        prop_assert!(
            sut.capacity() == capacity_before || sut.capacity() == capacity_before * 2
        );
        // 3) Live entries plus tombstones fit in the array
        prop_assert!(sut.len() + sut.tombstones() <= sut.capacity());
    }

    // Every surviving entry is still reachable
    for (k, v) in &model {
        prop_assert_eq!(sut.lookup(k), Some(v.as_str()));
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - lookup returns the most recent value; overwrite returns the old value.
// - remove/take report presence exactly as the model does.
// - A failed remove leaves len unchanged.
// - Growth keeps load < 0.7 and only ever doubles capacity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut = Table::with_capacity(capacity).expect("create");
        run_state_machine(sut, &pool, ops)?;
    }
}

// Constant hasher: every key starts probing at slot 0.
#[derive(Clone, Default, Debug)]
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

// Property: Same state-machine invariants under worst-case collisions, which
// forces every key through long probe chains full of tombstones.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((capacity, pool, ops) in arb_scenario()) {
        let sut = Table::with_capacity_and_hasher(capacity, ConstBuildHasher).expect("create");
        run_state_machine(sut, &pool, ops)?;
    }
}
