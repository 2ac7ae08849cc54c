//! Helpers for keys over the binary alphabet `'0'` / `'1'`, as produced by
//! [`VectorKey::from_bits`](crate::keys::vector_key::VectorKey::from_bits).

pub const ZERO: u8 = b'0';
pub const ONE: u8 = b'1';

#[inline]
pub fn is_binary_symbol(symbol: u8) -> bool {
    symbol == ZERO || symbol == ONE
}

pub fn is_binary(symbols: &[u8]) -> bool {
    symbols.iter().all(|&s| is_binary_symbol(s))
}

/// The other branch of a binary split: `'0'` for `'1'` and the reverse. `None` for anything that
/// isn't a binary symbol.
#[inline]
pub fn invert_binary_label(label: u8) -> Option<u8> {
    match label {
        ZERO => Some(ONE),
        ONE => Some(ZERO),
        _ => None,
    }
}
