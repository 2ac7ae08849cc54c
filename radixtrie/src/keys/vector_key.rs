use std::fmt;

use num_traits::PrimInt;

use crate::keys::KeyTrait;
use crate::partials::vector_partial::VectorPartial;
use crate::partials::Partial;
use crate::utils::binary::{is_binary_symbol, ONE, ZERO};

// Owns variable sized key data. Keys are not terminated: a key may be a strict prefix of another
// key, and both can be stored.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub struct VectorKey {
    data: Box<[u8]>,
}

impl VectorKey {
    pub fn new_from_str(s: &str) -> Self {
        Self::new_from_slice(s.as_bytes())
    }

    pub fn new_from_vec(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Builds a binary key from the `length` most significant bits of `value`, one `'0'` or `'1'`
    /// symbol per bit.
    ///
    /// Panics if `length` is wider than `T`.
    pub fn from_bits<T: PrimInt>(value: T, length: usize) -> Self {
        let width = T::zero().count_zeros() as usize;
        assert!(
            length <= width,
            "bit length {length} exceeds integer width {width}"
        );
        let data = (0..length)
            .map(|i| {
                if (value >> (width - 1 - i)) & T::one() == T::one() {
                    ONE
                } else {
                    ZERO
                }
            })
            .collect();
        Self::new_from_vec(data)
    }

    /// Reads a binary key back into the most significant bits of a `T`; the remaining low bits
    /// are zero.
    ///
    /// Returns `None` if the key holds a symbol other than `'0'` / `'1'`, or is wider than `T`.
    pub fn to_bits<T: PrimInt>(&self) -> Option<T> {
        let width = T::zero().count_zeros() as usize;
        if self.data.len() > width {
            return None;
        }
        let mut value = T::zero();
        for (i, &symbol) in self.data.iter().enumerate() {
            if !is_binary_symbol(symbol) {
                return None;
            }
            if symbol == ONE {
                value = value | (T::one() << (width - 1 - i));
            }
        }
        Some(value)
    }

    pub fn to_slice(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for VectorKey {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for VectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VectorKey(\"{}\")", self.data.escape_ascii())
    }
}

impl fmt::Display for VectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}

impl KeyTrait for VectorKey {
    type PartialType = VectorPartial;

    fn new_from_slice(data: &[u8]) -> Self {
        Self {
            data: Box::from(data),
        }
    }

    fn extend_from_partial(&self, partial: &Self::PartialType) -> Self {
        let mut v = Vec::with_capacity(self.data.len() + partial.len());
        v.extend_from_slice(&self.data);
        v.extend_from_slice(partial.to_slice());
        Self::new_from_vec(v)
    }
}

impl From<String> for VectorKey {
    fn from(data: String) -> Self {
        Self::new_from_vec(data.into_bytes())
    }
}
impl From<&String> for VectorKey {
    fn from(data: &String) -> Self {
        Self::new_from_str(data)
    }
}
impl From<&str> for VectorKey {
    fn from(data: &str) -> Self {
        Self::new_from_str(data)
    }
}
impl From<&[u8]> for VectorKey {
    fn from(data: &[u8]) -> Self {
        Self::new_from_slice(data)
    }
}
impl From<Vec<u8>> for VectorKey {
    fn from(data: Vec<u8>) -> Self {
        Self::new_from_vec(data)
    }
}
impl From<&VectorKey> for VectorKey {
    fn from(key: &VectorKey) -> Self {
        key.clone()
    }
}

// Big-endian bytes keep the numeric order of unsigned integers.
macro_rules! impl_from_unsigned {
    ( $($t:ty),* ) => {
    $(
    impl From< $t > for VectorKey
    {
        fn from(data: $t) -> Self {
            VectorKey::new_from_slice(&data.to_be_bytes())
        }
    }
    impl From< &$t > for VectorKey
    {
        fn from(data: &$t) -> Self {
            (*data).into()
        }
    }
    ) *
    }
}
impl_from_unsigned!(u8, u16, u32, u64, usize, u128);
