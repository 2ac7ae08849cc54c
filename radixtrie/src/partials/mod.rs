//! Node-local key segments.
//!
//! Every node in the tree carries the run of symbols consumed between its parent and itself.
//! A [`Partial`] owns that run and knows how to split it (on insert) and how to join two runs
//! back together (on merge).

use crate::keys::KeyTrait;

pub mod vector_partial;

pub trait Partial: AsRef<[u8]> + Clone {
    /// Returns an empty partial, as carried by the root.
    fn empty() -> Self;
    /// Returns a partial holding a copy of `slice`.
    fn from_slice(slice: &[u8]) -> Self;
    /// Returns a partial up to `length` bytes.
    fn partial_before(&self, length: usize) -> Self;
    /// Returns a partial from `start` onwards.
    fn partial_after(&self, start: usize) -> Self;
    /// Extends the partial with another partial.
    fn partial_extended_with(&self, other: &Self) -> Self;
    /// Returns the byte at `pos`.
    fn at(&self, pos: usize) -> u8;
    /// Returns the length of the partial.
    fn len(&self) -> usize;
    /// Returns true if the partial is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the length of the common prefix between `self` and `key`, starting at `at_depth`
    /// in the key.
    fn prefix_length_key<K>(&self, key: &K, at_depth: usize) -> usize
    where
        K: KeyTrait<PartialType = Self>,
    {
        self.prefix_length_slice(&key.as_ref()[at_depth..])
    }
    /// Returns the length of the common prefix between `self` and `slice`.
    fn prefix_length_slice(&self, slice: &[u8]) -> usize {
        self.as_ref()
            .iter()
            .zip(slice)
            .take_while(|(a, b)| a == b)
            .count()
    }
    /// Returns the partial as a slice.
    fn to_slice(&self) -> &[u8] {
        self.as_ref()
    }
}
