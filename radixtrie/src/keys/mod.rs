use std::fmt::Debug;

use crate::partials::Partial;

pub mod vector_key;

/// A key the tree can be indexed by: an immutable sequence of byte symbols.
pub trait KeyTrait: AsRef<[u8]> + Clone + Eq + Ord + Debug {
    type PartialType: Partial;

    fn new_from_slice(data: &[u8]) -> Self;

    #[inline]
    fn at(&self, pos: usize) -> u8 {
        self.as_ref()[pos]
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_partial(&self, at_depth: usize) -> Self::PartialType {
        <Self::PartialType as Partial>::from_slice(&self.as_ref()[at_depth..])
    }

    fn extend_from_partial(&self, partial: &Self::PartialType) -> Self;

    fn matches_slice(&self, slice: &[u8]) -> bool {
        self.as_ref() == slice
    }
}
