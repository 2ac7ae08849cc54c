use std::collections::BTreeMap;
use std::ops::ControlFlow;

use proptest::prelude::*;

use crate::keys::vector_key::VectorKey;
use crate::tree::RadixTree;

#[derive(Clone, Debug)]
enum Op<V> {
    Insert(Vec<u8>, V),
    Remove(Vec<u8>),
    RemovePrefix(Vec<u8>),
    Get(Vec<u8>),
    LongestPrefix(Vec<u8>),
}

// Binary keys share long prefixes, which exercises splits and merges far more than random bytes.
fn binary_key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    prop::collection::vec(prop::sample::select(vec![b'0', b'1']), 0..=12)
}

fn text_key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    prop::collection::vec(b'a'..=b'd', 0..=8)
}

fn ops_strategy(
    key: impl Strategy<Value = Vec<u8>> + Clone + 'static,
) -> impl Strategy<Value = Vec<Op<u64>>> {
    let op = prop_oneof![
        45 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        20 => key.clone().prop_map(Op::Remove),
        3 => key.clone().prop_map(Op::RemovePrefix),
        16 => key.clone().prop_map(Op::Get),
        16 => key.clone().prop_map(Op::LongestPrefix),
    ];
    prop::collection::vec(op, 0..=500)
}

fn model_longest_prefix(m: &BTreeMap<Vec<u8>, u64>, q: &[u8]) -> Option<(Vec<u8>, u64)> {
    (0..=q.len())
        .rev()
        .find_map(|len| m.get(&q[..len]).map(|v| (q[..len].to_vec(), *v)))
}

fn replay(ops: Vec<Op<u64>>) -> Result<(), TestCaseError> {
    let mut t = RadixTree::<VectorKey, u64>::new();
    let mut m: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                let old_t = t.insert(key.as_slice(), value);
                let old_m = m.insert(key, value);
                prop_assert_eq!(old_t, old_m);
            }
            Op::Remove(key) => {
                let old_t = t.remove(key.as_slice());
                let old_m = m.remove(key.as_slice());
                prop_assert_eq!(old_t, old_m);
            }
            Op::RemovePrefix(prefix) => {
                let before = m.len();
                m.retain(|k, _| !k.starts_with(&prefix));
                let removed = t.remove_prefix(prefix.as_slice());
                prop_assert_eq!(removed, before - m.len());
            }
            Op::Get(key) => {
                let got_t = t.get(key.as_slice()).copied();
                let got_m = m.get(key.as_slice()).copied();
                prop_assert_eq!(got_t, got_m);
            }
            Op::LongestPrefix(key) => {
                let got_t = t
                    .longest_prefix(key.as_slice())
                    .map(|(k, v)| (k.to_slice().to_vec(), *v));
                prop_assert_eq!(got_t, model_longest_prefix(&m, &key));
            }
        }

        prop_assert_eq!(t.len(), m.len());
    }

    t.assert_invariants();
    let got: Vec<(Vec<u8>, u64)> = t.iter().map(|(k, v)| (k.to_slice().to_vec(), *v)).collect();
    let expected: Vec<(Vec<u8>, u64)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
    prop_assert_eq!(got, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_binary(ops in ops_strategy(binary_key_strategy())) {
        replay(ops)?;
    }

    #[test]
    fn prop_equivalence_text(ops in ops_strategy(text_key_strategy())) {
        replay(ops)?;
    }

    #[test]
    fn prop_walk_prefix_matches_filter(
        keys in prop::collection::vec(binary_key_strategy(), 0..=200),
        prefix in binary_key_strategy(),
    ) {
        let t: RadixTree<VectorKey, ()> = keys.iter().map(|k| (k.as_slice(), ())).collect();
        let mut got = vec![];
        t.walk_prefix(prefix.as_slice(), |k, _| {
            got.push(k.to_slice().to_vec());
            ControlFlow::Continue(())
        });
        let mut expected: Vec<Vec<u8>> = keys.into_iter().filter(|k| k.starts_with(&prefix)).collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_post_order_reports_nearest_descendants(
        keys in prop::collection::vec(binary_key_strategy(), 0..=100),
    ) {
        let t: RadixTree<VectorKey, ()> = keys.iter().map(|k| (k.as_slice(), ())).collect();
        let stored: Vec<Vec<u8>> = t.iter().map(|(k, _)| k.to_slice().to_vec()).collect();

        let mut visits = vec![];
        t.walk_post_order(|(parent, _), children| {
            let children: Vec<Vec<u8>> = children.iter().map(|(k, _)| k.to_slice().to_vec()).collect();
            visits.push((parent.to_slice().to_vec(), children));
        });
        prop_assert_eq!(visits.len(), stored.len());

        for (parent, children) in visits {
            // Strict extensions of `parent` with no other stored key in between.
            let expected: Vec<Vec<u8>> = stored
                .iter()
                .filter(|c| c.len() > parent.len() && c.starts_with(&parent))
                .filter(|c| {
                    !stored.iter().any(|mid| {
                        mid.len() > parent.len() && mid.len() < c.len() && c.starts_with(mid) && mid.starts_with(&parent)
                    })
                })
                .cloned()
                .collect();
            prop_assert_eq!(children, expected);
        }
    }
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<&str> = vec!["", "1", "10", "100", "101", "1011", "11", "0"];

    // Removing in every rotation and its reverse visits the merge cases (entry with one child,
    // branch point losing a side, empty leaf) from both directions.
    for start in 0..keys.len() {
        for reverse in [false, true] {
            let mut order: Vec<&str> = keys[start..].iter().chain(&keys[..start]).copied().collect();
            if reverse {
                order.reverse();
            }

            let mut t: RadixTree<VectorKey, usize> =
                keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
            for (removed, k) in order.iter().enumerate() {
                assert!(t.remove(*k).is_some(), "{k} should be present");
                t.assert_invariants();
                assert_eq!(t.len(), keys.len() - removed - 1);
                for rest in &order[removed + 1..] {
                    assert!(t.get(*rest).is_some(), "{rest} lost after removing {k}");
                }
            }
        }
    }
}
