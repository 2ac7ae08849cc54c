use tracing::trace;

use crate::keys::KeyTrait;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::mapping::NodeMapping;
use crate::partials::Partial;

/// The entry stored at a node whose path spells out an inserted key.
pub(crate) struct LeafData<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> LeafData<K, V> {
    #[inline]
    pub(crate) fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

pub(crate) struct Node<K: KeyTrait, V> {
    pub(crate) prefix: K::PartialType,
    pub(crate) leaf: Option<LeafData<K, V>>,
    pub(crate) children: SortedKeyedMapping<Node<K, V>>,
}

impl<K: KeyTrait, V> Node<K, V> {
    #[inline]
    pub(crate) fn new_root() -> Self {
        Self::new_inner(<K::PartialType as Partial>::empty())
    }

    #[inline]
    pub(crate) fn new_leaf(partial: K::PartialType, key: K, value: V) -> Self {
        Self {
            prefix: partial,
            leaf: Some(LeafData::new(key, value)),
            children: SortedKeyedMapping::new(),
        }
    }

    #[inline]
    pub(crate) fn new_inner(prefix: K::PartialType) -> Self {
        Self {
            prefix,
            leaf: None,
            children: SortedKeyedMapping::new(),
        }
    }

    pub fn value(&self) -> Option<&V> {
        self.leaf.as_ref().map(|leaf| &leaf.value)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.leaf.as_mut().map(|leaf| &mut leaf.value)
    }

    pub fn entry(&self) -> Option<(&K, &V)> {
        self.leaf.as_ref().map(|leaf| (&leaf.key, &leaf.value))
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    pub fn num_children(&self) -> usize {
        self.children.num_children()
    }

    pub(crate) fn seek_child(&self, key: u8) -> Option<&Node<K, V>> {
        self.children.seek_child(key)
    }

    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<K, V>> {
        self.children.seek_child_mut(key)
    }

    pub(crate) fn add_child(&mut self, key: u8, node: Node<K, V>) {
        debug_assert_eq!(node.prefix.at(0), key);
        self.children.add_child(key, node);
    }

    pub(crate) fn delete_child(&mut self, key: u8) -> Option<Node<K, V>> {
        self.children.delete_child(key)
    }

    /// Puts a new inner node holding the first `at` symbols of this node's prefix in this
    /// node's place, and re-parents the current contents under it.
    pub(crate) fn split_prefix(&mut self, at: usize) {
        debug_assert!(at > 0 && at < self.prefix.len());
        let inner = Node::new_inner(self.prefix.partial_before(at));
        let mut old = std::mem::replace(self, inner);
        old.prefix = old.prefix.partial_after(at);
        let k = old.prefix.at(0);
        self.add_child(k, old);
    }

    /// Folds the only child into this node: the child's prefix is appended to ours and its entry
    /// and children become ours. The edge label leading to this node is unchanged.
    pub(crate) fn merge_only_child(&mut self) {
        debug_assert!(self.leaf.is_none());
        let (_, child) = self.children.take_value_for_leaf();
        self.prefix = self.prefix.partial_extended_with(&child.prefix);
        self.leaf = child.leaf;
        self.children = child.children;
    }

    /// Restores compression on a non-root node after something beneath it was removed. Returns
    /// true if the node holds nothing at all anymore and should be detached by its parent.
    pub(crate) fn compact(&mut self) -> bool {
        if self.leaf.is_some() {
            return false;
        }
        match self.num_children() {
            0 => true,
            1 => {
                trace!(prefix_len = self.prefix.len(), "merging only child");
                self.merge_only_child();
                false
            }
            _ => false,
        }
    }

    pub(crate) fn iter(&self) -> impl DoubleEndedIterator<Item = (u8, &Self)> + '_ {
        self.children.iter()
    }
}
