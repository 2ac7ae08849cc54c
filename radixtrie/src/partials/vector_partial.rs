use crate::partials::Partial;

/// Heap-allocated partial used for every node prefix.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct VectorPartial {
    data: Box<[u8]>,
}

impl VectorPartial {
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }
}

impl AsRef<[u8]> for VectorPartial {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Partial for VectorPartial {
    fn empty() -> Self {
        Self::default()
    }

    fn from_slice(slice: &[u8]) -> Self {
        Self {
            data: Box::from(slice),
        }
    }

    fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.data.len());
        VectorPartial::from_slice(&self.data[..length])
    }

    fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.data.len());
        VectorPartial::from_slice(&self.data[start..])
    }

    fn partial_extended_with(&self, other: &Self) -> Self {
        let mut v = Vec::with_capacity(self.data.len() + other.data.len());
        v.extend_from_slice(&self.data);
        v.extend_from_slice(&other.data);
        VectorPartial::from_vec(v)
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> u8 {
        assert!(pos < self.data.len());
        self.data[pos]
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.data.len()
    }
}
