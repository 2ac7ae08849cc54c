#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use radixtrie::keys::vector_key::VectorKey;
use radixtrie::tree::RadixTree;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: u16 },
    Insert { key: u16, val: usize },
    Update { key: u16, val: usize },
    Delete { key: u16 },
    DeletePrefix { key: u16 },
    LongestPrefix { key: u16 },
}

// Low 4 bits give the length, the high 12 bits the symbols: short binary keys that nest a lot.
fn binary_key(raw: u16) -> Vec<u8> {
    let len = (raw & 0xf) as usize % 13;
    (0..len)
        .map(|i| if raw & (0x8000 >> i) != 0 { b'1' } else { b'0' })
        .collect()
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut tree = RadixTree::<VectorKey, usize>::new();
    let mut bt_map = BTreeMap::<Vec<u8>, usize>::new();

    for m in methods {
        match m {
            MapMethod::Get { key } => {
                let key = binary_key(key);
                assert_eq!(tree.get(key.as_slice()), bt_map.get(&key));
            }
            MapMethod::Insert { key, val } => {
                let key = binary_key(key);
                let tree_insert = tree.insert(key.as_slice(), val);
                let btree_insert = bt_map.insert(key, val);
                assert_eq!(tree_insert, btree_insert);
            }
            MapMethod::Update { key, val } => {
                let key = binary_key(key);
                let old_tree = tree.get_mut(key.as_slice());
                let old_bt = bt_map.get_mut(&key);
                assert_eq!(old_tree, old_bt);
                if let (Some(old_tree), Some(old_bt)) = (old_tree, old_bt) {
                    *old_tree = val;
                    *old_bt = val;
                }
            }
            MapMethod::Delete { key } => {
                let key = binary_key(key);
                assert_eq!(tree.remove(key.as_slice()), bt_map.remove(&key));
            }
            MapMethod::DeletePrefix { key } => {
                let prefix = binary_key(key);
                let before = bt_map.len();
                bt_map.retain(|k, _| !k.starts_with(&prefix));
                assert_eq!(tree.remove_prefix(prefix.as_slice()), before - bt_map.len());
            }
            MapMethod::LongestPrefix { key } => {
                let key = binary_key(key);
                let expected = (0..=key.len())
                    .rev()
                    .find_map(|len| bt_map.get(&key[..len]));
                assert_eq!(tree.longest_prefix(key.as_slice()).map(|(_, v)| v), expected);
            }
        }
        assert_eq!(tree.len(), bt_map.len());
    }

    let got: Vec<(Vec<u8>, usize)> = tree
        .iter()
        .map(|(k, v)| (k.to_slice().to_vec(), *v))
        .collect();
    let expected: Vec<(Vec<u8>, usize)> = bt_map.into_iter().collect();
    assert_eq!(got, expected);
});
