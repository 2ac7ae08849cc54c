//! A compressed radix tree (Patricia trie) keyed by byte-symbol strings.
//!
//! Alongside exact lookup it answers the questions a routing or allocation table asks:
//! longest-prefix match, the entries under a prefix, the entries above a key, and (over binary
//! keys) the first unused sub-prefix of a stored prefix. With the `address` feature, IPv4 CIDR
//! prefixes map onto binary keys so those queries work directly on address space.
//!
//! ```rust
//! use radixtrie::{RadixTree, VectorKey};
//!
//! let mut tree = RadixTree::<VectorKey, u32>::new();
//! tree.insert("romane", 1);
//! tree.insert("romanus", 2);
//! tree.insert("rubens", 3);
//!
//! let under_rom: Vec<u32> = tree.iter_prefix("rom").map(|(_, v)| *v).collect();
//! assert_eq!(under_rom, vec![1, 2]);
//! assert_eq!(tree.remove_prefix("r"), 3);
//! assert!(tree.is_empty());
//! ```

#[cfg(feature = "address")]
pub mod address;
pub mod error;
pub mod iter;
pub mod keys;
pub mod mapping;
mod node;
pub mod partials;
pub mod stats;
pub mod tree;
pub mod utils;

#[cfg(test)]
mod proptests;

pub use error::AddressError;
pub use keys::vector_key::VectorKey;
pub use keys::KeyTrait;
pub use stats::{TreeStats, TreeStatsTrait};
pub use tree::RadixTree;
