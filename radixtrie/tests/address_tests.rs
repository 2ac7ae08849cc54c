#![cfg(feature = "address")]

use std::ops::ControlFlow;

use radixtrie::address::{ipv4_prefix_key, ipv4_prefix_string, load_prefixes};
use radixtrie::{AddressError, RadixTree, VectorKey};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// A slice of a public prefix-to-origin table, IPv6 rows included.
const TABLE: &[(&str, u32)] = &[
    ("1.0.0.0/24", 13335),
    ("1.0.4.0/22", 38803),
    ("1.0.4.0/24", 38803),
    ("1.0.5.0/24", 38803),
    ("1.0.16.0/24", 2519),
    ("2001:200::/32", 2500),
    ("8.8.8.0/24", 15169),
    ("2a00:1450::/32", 15169),
];

fn load_table() -> RadixTree<VectorKey, u32> {
    let mut tree = RadixTree::new();
    let loaded = load_prefixes(&mut tree, TABLE.iter().copied()).unwrap();
    assert_eq!(loaded, 6);
    tree
}

#[test]
fn load_skips_ipv6() {
    init_tracing();
    let tree = load_table();
    assert_eq!(tree.len(), 6);
    assert!(tree.iter().all(|(k, _)| ipv4_prefix_string(k).is_ok()));
}

#[test]
fn origin_lookup() {
    init_tracing();
    let tree = load_table();
    let origin = |addr: &str| {
        let key = ipv4_prefix_key(addr).unwrap();
        tree.longest_prefix_k(&key).map(|(k, v)| (ipv4_prefix_string(k).unwrap(), *v))
    };
    assert_eq!(origin("1.0.0.1/32"), Some(("1.0.0.0/24".to_string(), 13335)));
    assert_eq!(origin("1.0.6.1/32"), Some(("1.0.4.0/22".to_string(), 38803)));
    assert_eq!(origin("1.0.5.200/32"), Some(("1.0.5.0/24".to_string(), 38803)));
    assert_eq!(origin("8.8.4.4/32"), None);
}

#[test]
fn covered_prefixes() {
    init_tracing();
    let tree = load_table();
    let mut covered = vec![];
    tree.walk_prefix(ipv4_prefix_key("1.0.4.0/22").unwrap(), |k, _| {
        covered.push(ipv4_prefix_string(k).unwrap());
        ControlFlow::Continue(())
    });
    assert_eq!(covered, vec!["1.0.4.0/22", "1.0.4.0/24", "1.0.5.0/24"]);

    // Aggregation: each announced prefix with the more specifics it hides.
    let mut aggregates = vec![];
    tree.walk_post_order(|(parent, _), children| {
        if !children.is_empty() {
            aggregates.push((ipv4_prefix_string(parent).unwrap(), children.len()));
        }
    });
    assert_eq!(aggregates, vec![("1.0.4.0/22".to_string(), 2)]);
}

#[test]
fn free_space_under_announcement() {
    init_tracing();
    let mut tree = load_table();
    let agg = ipv4_prefix_key("1.0.4.0/22").unwrap();

    // Both /24s sit in the lower /23, the upper one is free.
    let free = tree.first_non_included_prefix_k(&agg).unwrap();
    assert_eq!(ipv4_prefix_string(&free).unwrap(), "1.0.6.0/23");

    tree.insert_k(&free, 64500);
    assert_eq!(tree.first_non_included_prefix_k(&agg), None);

    // Nothing more specific under it, the prefix itself is free.
    let leaf = ipv4_prefix_key("1.0.16.0/24").unwrap();
    assert_eq!(tree.first_non_included_prefix_k(&leaf), Some(leaf.clone()));
}

#[test]
fn malformed_prefix_stops_load() {
    init_tracing();
    let mut tree = RadixTree::<VectorKey, u32>::new();
    let err = load_prefixes(&mut tree, [("10.0.0.0/8", 1), ("10.0.0.0/40", 2)]).unwrap_err();
    assert_eq!(err, AddressError::LengthOutOfRange { length: 40, max: 32 });
    assert_eq!(err.to_string(), "prefix length 40 exceeds 32 bits");
    assert_eq!(tree.len(), 1);
}
