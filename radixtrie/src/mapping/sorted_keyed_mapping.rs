use crate::mapping::NodeMapping;

/// Maps a key to a node, using a sorted array of keys and a corresponding array of nodes.
/// Presence of a key at a position means there is a node at the same position in children.
/// Keys are kept sorted so lookups are a binary search and iteration yields children in
/// ascending key order. When an item is inserted or deleted the items to its right are shifted.
pub struct SortedKeyedMapping<N> {
    pub(crate) keys: Vec<u8>,
    pub(crate) children: Vec<N>,
}

impl<N> Default for SortedKeyedMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> IntoIterator for SortedKeyedMapping<N> {
    type Item = (u8, N);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<u8>, std::vec::IntoIter<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter().zip(self.children)
    }
}

impl<N> SortedKeyedMapping<N> {
    #[inline]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    fn find(&self, key: u8) -> Result<usize, usize> {
        self.keys.binary_search(&key)
    }

    // Return the key and value of the only child, and remove it from the mapping.
    pub fn take_value_for_leaf(&mut self) -> (u8, N) {
        debug_assert!(self.keys.len() == 1);
        let key = self.keys.remove(0);
        let child = self.children.remove(0);
        (key, child)
    }

    pub fn first(&self) -> Option<&N> {
        self.children.first()
    }

    pub fn last(&self) -> Option<&N> {
        self.children.last()
    }

    pub fn first_key(&self) -> Option<u8> {
        self.keys.first().copied()
    }

    /// Children in ascending key order.
    #[inline]
    pub fn values(&self) -> std::slice::Iter<'_, N> {
        self.children.iter()
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, &N)> + '_ {
        self.keys.iter().copied().zip(self.children.iter())
    }
}

impl<N> NodeMapping<N> for SortedKeyedMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        match self.find(key) {
            Ok(_) => panic!("adding duplicate edge {key:#04x}"),
            Err(idx) => {
                self.keys.insert(idx, key);
                self.children.insert(idx, node);
            }
        }
    }

    fn update_child(&mut self, key: u8, node: N) -> N {
        match self.find(key) {
            Ok(idx) => std::mem::replace(&mut self.children[idx], node),
            Err(_) => panic!("replacing missing edge {key:#04x}"),
        }
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = self.find(key).ok()?;
        Some(&self.children[idx])
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = self.find(key).ok()?;
        Some(&mut self.children[idx])
    }

    fn delete_child(&mut self, key: u8) -> Option<N> {
        let idx = self.find(key).ok()?;
        self.keys.remove(idx);
        Some(self.children.remove(idx))
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.keys.len()
    }
}
