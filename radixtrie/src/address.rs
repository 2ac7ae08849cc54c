//! Adapters between IPv4 prefixes in CIDR notation and binary keys.
//!
//! A prefix `a.b.c.d/len` becomes the key made of the `len` most significant bits of the
//! address, one `'0'` or `'1'` symbol per bit. Covering prefixes are then key prefixes of the
//! prefixes they cover, so [`RadixTree::longest_prefix`] is a routing-table lookup and
//! [`RadixTree::first_non_included_prefix`] finds free address space.
//!
//! ```rust
//! use radixtrie::address::{ipv4_prefix_key, ipv4_prefix_string};
//!
//! let key = ipv4_prefix_key("1.0.4.0/22").unwrap();
//! assert_eq!(key.to_string(), "0000000100000000000001");
//! assert_eq!(ipv4_prefix_string(&key).unwrap(), "1.0.4.0/22");
//! ```

use std::net::Ipv4Addr;

use tracing::debug;

use crate::error::AddressError;
use crate::keys::vector_key::VectorKey;
use crate::keys::KeyTrait;
use crate::tree::RadixTree;
use crate::utils::binary::is_binary_symbol;

pub const IPV4_BITS: usize = 32;

/// Translates `a.b.c.d/len` into its binary key. Host bits past `len` are ignored.
pub fn ipv4_prefix_key(prefix: &str) -> Result<VectorKey, AddressError> {
    let Some((addr, length)) = prefix.split_once('/') else {
        return Err(AddressError::MissingLength(prefix.to_string()));
    };
    if addr.contains(':') {
        return Err(AddressError::UnsupportedFamily(prefix.to_string()));
    }
    let addr: Ipv4Addr = addr.parse().map_err(|source| AddressError::InvalidAddress {
        input: prefix.to_string(),
        source,
    })?;
    let length: usize = length.parse().map_err(|source| AddressError::InvalidLength {
        input: prefix.to_string(),
        source,
    })?;
    if length > IPV4_BITS {
        return Err(AddressError::LengthOutOfRange {
            length,
            max: IPV4_BITS,
        });
    }
    Ok(VectorKey::from_bits(u32::from(addr), length))
}

/// Translates a binary key back into `a.b.c.d/len`, with zeroed host bits.
pub fn ipv4_prefix_string(key: &VectorKey) -> Result<String, AddressError> {
    if key.len() > IPV4_BITS {
        return Err(AddressError::LengthOutOfRange {
            length: key.len(),
            max: IPV4_BITS,
        });
    }
    if let Some((position, &symbol)) = key
        .to_slice()
        .iter()
        .enumerate()
        .find(|(_, symbol)| !is_binary_symbol(**symbol))
    {
        return Err(AddressError::NonBinarySymbol { position, symbol });
    }
    let bits = key.to_bits::<u32>().unwrap_or_default();
    Ok(format!("{}/{}", Ipv4Addr::from(bits), key.len()))
}

/// Inserts every `(prefix, value)` pair into `tree`, returning how many were inserted.
///
/// IPv6 prefixes are skipped. The first malformed IPv4 prefix stops the load with an error;
/// the pairs before it stay inserted.
pub fn load_prefixes<V, S, I>(
    tree: &mut RadixTree<VectorKey, V>,
    entries: I,
) -> Result<usize, AddressError>
where
    S: AsRef<str>,
    I: IntoIterator<Item = (S, V)>,
{
    let mut inserted = 0;
    for (prefix, value) in entries {
        let prefix = prefix.as_ref();
        if prefix.contains(':') {
            debug!(prefix, "skipping IPv6 prefix");
            continue;
        }
        let key = ipv4_prefix_key(prefix)?;
        tree.insert_k(&key, value);
        inserted += 1;
    }
    Ok(inserted)
}
