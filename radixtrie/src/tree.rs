//! Compressed radix tree implementation.
//!
//! This module contains the main [`RadixTree`] implementation: exact lookup, longest-prefix
//! match, the walk family, and the structural mutations (split on insert, merge on removal,
//! subtree removal).

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::iter::{Iter, PathIter};
use crate::keys::KeyTrait;
use crate::node::{LeafData, Node};
use crate::partials::Partial;
use crate::stats::{update_tree_stats, TreeStats, TreeStatsTrait};
use crate::utils::binary::{invert_binary_label, is_binary};

/// A borrowed `(key, value)` pair as handed to walk visitors.
pub type Entry<'a, K, V> = (&'a K, &'a V);

/// A compressed radix tree ("Patricia trie") mapping symbol strings to values.
///
/// Every node holds the run of symbols consumed between its parent and itself, so chains of
/// single-child nodes never exist: a node other than the root either stores an entry or branches
/// into at least two children. Children are kept ordered by their first symbol, which makes
/// iteration lexicographic and lookups a binary search per level.
///
/// Keys may be prefixes of one another; both are stored. This is what longest-prefix match and
/// the path/post-order walks build on.
///
/// ## Examples
///
/// ```rust
/// use radixtrie::{RadixTree, VectorKey};
///
/// let mut tree = RadixTree::<VectorKey, &str>::new();
/// tree.insert("10", "ten");
/// tree.insert("1011", "eleven");
///
/// assert_eq!(tree.get("10"), Some(&"ten"));
/// assert_eq!(tree.get("101"), None);
///
/// let (key, value) = tree.longest_prefix("10110").unwrap();
/// assert_eq!(key.to_string(), "1011");
/// assert_eq!(*value, "eleven");
/// ```
pub struct RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    root: Node<KeyType, ValueType>,
    size: usize,
}

impl<KeyType: KeyTrait, ValueType> Default for RadixTree<KeyType, ValueType> {
    fn default() -> Self {
        Self::new()
    }
}

impl<KeyType, ValueType> RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            root: Node::new_root(),
            size: 0,
        }
    }

    /// Create a tree holding every pair of `entries`. Later duplicates overwrite earlier ones.
    pub fn from_entries<I, KV>(entries: I) -> Self
    where
        I: IntoIterator<Item = (KV, ValueType)>,
        KV: Into<KeyType>,
    {
        let mut tree = Self::new();
        tree.extend(entries);
        tree
    }

    /// Number of entries stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.root = Node::new_root();
        self.size = 0;
    }

    /// Get a value by key (generic version).
    #[inline]
    pub fn get<Key>(&self, key: Key) -> Option<&ValueType>
    where
        Key: Into<KeyType>,
    {
        self.get_k(&key.into())
    }

    /// Get a value by key reference (direct version).
    ///
    /// Succeeds only if the key is consumed exactly on a node holding an entry.
    pub fn get_k(&self, key: &KeyType) -> Option<&ValueType> {
        let (depth, node) = self.path(key).last()?;
        if depth != key.len() {
            return None;
        }
        node.value()
    }

    /// Get a mutable reference to a value by key (generic version).
    #[inline]
    pub fn get_mut<Key>(&mut self, key: Key) -> Option<&mut ValueType>
    where
        Key: Into<KeyType>,
    {
        self.get_mut_k(&key.into())
    }

    /// Get a mutable reference to a value by key reference (direct version).
    pub fn get_mut_k(&mut self, key: &KeyType) -> Option<&mut ValueType> {
        let mut cur_node = &mut self.root;
        let mut depth = 0;
        loop {
            if depth == key.len() {
                return cur_node.value_mut();
            }
            let child = cur_node.seek_child_mut(key.at(depth))?;
            if child.prefix.prefix_length_key(key, depth) != child.prefix.len() {
                return None;
            }
            depth += child.prefix.len();
            cur_node = child;
        }
    }

    /// Insert a key-value pair (generic version).
    ///
    /// # Returns
    ///
    /// - `Some(old_value)` if a previous value was replaced
    /// - `None` if this was a new key
    ///
    /// # Examples
    ///
    /// ```rust
    /// use radixtrie::{RadixTree, VectorKey};
    ///
    /// let mut tree = RadixTree::<VectorKey, i32>::new();
    /// assert_eq!(tree.insert("key1", 100), None);
    /// assert_eq!(tree.insert("key1", 200), Some(100));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn insert<KV>(&mut self, key: KV, value: ValueType) -> Option<ValueType>
    where
        KV: Into<KeyType>,
    {
        self.insert_k(&key.into(), value)
    }

    /// Insert a key-value pair using key reference (direct version).
    pub fn insert_k(&mut self, key: &KeyType, value: ValueType) -> Option<ValueType> {
        let replaced = Self::insert_recurse(&mut self.root, key, value, 0);
        if replaced.is_none() {
            self.size += 1;
        }
        replaced
    }

    /// Remove a key-value pair (generic version).
    ///
    /// Returns the removed value if the key existed.
    pub fn remove<KV>(&mut self, key: KV) -> Option<ValueType>
    where
        KV: Into<KeyType>,
    {
        self.remove_k(&key.into())
    }

    /// Remove a key-value pair using key reference (direct version).
    pub fn remove_k(&mut self, key: &KeyType) -> Option<ValueType> {
        let removed = if key.is_empty() {
            self.root.leaf.take()?.value
        } else {
            Self::remove_recurse(&mut self.root, key, 0)?
        };
        self.size -= 1;
        Some(removed)
    }

    /// Remove every entry whose key starts with `prefix` (generic version).
    ///
    /// Returns how many entries were removed.
    pub fn remove_prefix<KV>(&mut self, prefix: KV) -> usize
    where
        KV: Into<KeyType>,
    {
        self.remove_prefix_k(&prefix.into())
    }

    /// Remove every entry whose key starts with `prefix` (direct version).
    ///
    /// The subtree is detached in one step. A prefix that ends inside an edge selects the node
    /// that edge leads to, since all of its keys extend the prefix. The empty prefix clears the
    /// tree.
    pub fn remove_prefix_k(&mut self, prefix: &KeyType) -> usize {
        let removed = if prefix.is_empty() {
            let removed = self.size;
            self.root = Node::new_root();
            removed
        } else {
            Self::remove_prefix_recurse(&mut self.root, prefix, 0)
        };
        trace!(?prefix, removed, "removed subtree");
        self.size -= removed;
        removed
    }

    /// Find the entry with the longest key that is a prefix of (or equal to) `key` (generic
    /// version).
    pub fn longest_prefix<Key>(&self, key: Key) -> Option<Entry<'_, KeyType, ValueType>>
    where
        Key: Into<KeyType>,
    {
        self.longest_prefix_k(&key.into())
    }

    /// Find the entry with the longest key that is a prefix of (or equal to) `key` (direct
    /// version).
    ///
    /// Unlike [`get_k`](Self::get_k) the key does not need to be fully consumed; the deepest
    /// entry seen along the descent wins, including an entry on the root.
    pub fn longest_prefix_k(&self, key: &KeyType) -> Option<Entry<'_, KeyType, ValueType>> {
        self.longest_prefix_node(key).and_then(Node::entry)
    }

    /// Over binary keys, find the first prefix contained in the longest-prefix match for `key`
    /// that none of the match's more specific entries cover (generic version).
    pub fn first_non_included_prefix<Key>(&self, key: Key) -> Option<KeyType>
    where
        Key: Into<KeyType>,
    {
        self.first_non_included_prefix_k(&key.into())
    }

    /// Over binary keys, find the first prefix contained in the longest-prefix match for `key`
    /// that none of the match's more specific entries cover (direct version).
    ///
    /// With `n` the node matched by [`longest_prefix_k`](Self::longest_prefix_k):
    ///
    /// - no children: nothing more specific exists under `n`, its own key is returned;
    /// - one child: the other half of the split is still free, `n`'s key extended with the
    ///   complement of the child's first symbol is returned;
    /// - two children: the whole space under `n` is taken, `None` is returned.
    ///
    /// Keys over anything but the `'0'` / `'1'` alphabet are rejected with `None`.
    pub fn first_non_included_prefix_k(&self, key: &KeyType) -> Option<KeyType> {
        if !is_binary(key.as_ref()) {
            debug!(?key, "rejecting non-binary key for prefix allocation");
            return None;
        }
        let node = self.longest_prefix_node(key)?;
        let leaf = node.leaf.as_ref()?;
        match node.num_children() {
            0 => Some(leaf.key.clone()),
            1 => {
                let label = node.children.first_key()?;
                let Some(free) = invert_binary_label(label) else {
                    debug!(?key, label, "rejecting non-binary edge for prefix allocation");
                    return None;
                };
                let free = <KeyType::PartialType as Partial>::from_slice(&[free]);
                Some(leaf.key.extend_from_partial(&free))
            }
            _ => None,
        }
    }

    /// The entry with the smallest key.
    pub fn minimum(&self) -> Option<Entry<'_, KeyType, ValueType>> {
        let mut cur_node = &self.root;
        loop {
            if let Some(entry) = cur_node.entry() {
                return Some(entry);
            }
            cur_node = cur_node.children.first()?;
        }
    }

    /// The entry with the largest key.
    ///
    /// An entry sorts before all of its extensions, so the answer is always on the deepest node
    /// of the last branch, never on one of its ancestors.
    pub fn maximum(&self) -> Option<Entry<'_, KeyType, ValueType>> {
        let mut cur_node = &self.root;
        while let Some(last) = cur_node.children.last() {
            cur_node = last;
        }
        cur_node.entry()
    }

    /// Create an iterator over all key-value pairs, in lexicographic key order.
    pub fn iter(&self) -> Iter<'_, KeyType, ValueType> {
        Iter::new(Some(&self.root))
    }

    /// Create an iterator over the key-value pairs whose keys start with `prefix` (generic
    /// version).
    pub fn iter_prefix<Key>(&self, prefix: Key) -> Iter<'_, KeyType, ValueType>
    where
        Key: Into<KeyType>,
    {
        self.iter_prefix_k(&prefix.into())
    }

    /// Create an iterator over the key-value pairs whose keys start with `prefix` (direct
    /// version).
    pub fn iter_prefix_k(&self, prefix: &KeyType) -> Iter<'_, KeyType, ValueType> {
        Iter::new(self.seek_prefix(prefix))
    }

    /// Visit every entry in lexicographic key order until `visit` breaks.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&KeyType, &ValueType) -> ControlFlow<()>,
    {
        _ = self.iter().try_for_each(|(k, v)| visit(k, v));
    }

    /// Visit every entry whose key starts with `prefix`, in lexicographic key order, until
    /// `visit` breaks.
    pub fn walk_prefix<Key, F>(&self, prefix: Key, mut visit: F)
    where
        Key: Into<KeyType>,
        F: FnMut(&KeyType, &ValueType) -> ControlFlow<()>,
    {
        _ = self.iter_prefix(prefix).try_for_each(|(k, v)| visit(k, v));
    }

    /// Visit the entries whose keys are prefixes of `key` (including `key` itself), from the
    /// root down, until `visit` breaks. Where [`walk_prefix`](Self::walk_prefix) walks the
    /// entries *under* a prefix, this walks the entries *above* a key.
    pub fn walk_path<Key, F>(&self, key: Key, mut visit: F)
    where
        Key: Into<KeyType>,
        F: FnMut(&KeyType, &ValueType) -> ControlFlow<()>,
    {
        let key = key.into();
        for (_, node) in self.path(&key) {
            if let Some((k, v)) = node.entry() {
                if visit(k, v).is_break() {
                    return;
                }
            }
        }
    }

    /// Visit every entry after its more specific entries.
    ///
    /// `visit` is called once per entry with the entry itself and the entries reported by its
    /// subtrees: along each branch below it, the first entries met (an entry hides everything
    /// under it, which was reported to it in its own call). Nodes without an entry are never
    /// passed to `visit`; they hand their children's entries up unchanged.
    ///
    /// ```rust
    /// use radixtrie::{RadixTree, VectorKey};
    ///
    /// let mut tree = RadixTree::<VectorKey, ()>::new();
    /// for k in ["10", "100", "101", "1011"] {
    ///     tree.insert(k, ());
    /// }
    /// let mut seen = Vec::new();
    /// tree.walk_post_order(|(parent, _), children| {
    ///     let children: Vec<String> = children.iter().map(|(k, _)| k.to_string()).collect();
    ///     seen.push((parent.to_string(), children));
    /// });
    /// assert_eq!(seen.last().unwrap(), &("10".to_string(), vec!["100".to_string(), "101".to_string()]));
    /// ```
    pub fn walk_post_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(Entry<'a, KeyType, ValueType>, &[Entry<'a, KeyType, ValueType>]),
    {
        Self::post_order_recurse(&self.root, &mut visit);
    }

    /// Snapshot the tree into a `HashMap`, passing every key through `key_transform`.
    pub fn to_map<T, F>(&self, mut key_transform: F) -> HashMap<T, ValueType>
    where
        T: Hash + Eq,
        F: FnMut(&KeyType) -> T,
        ValueType: Clone,
    {
        let mut out = HashMap::with_capacity(self.size);
        for (k, v) in self.iter() {
            out.insert(key_transform(k), v.clone());
        }
        out
    }

    pub(crate) fn path<'a, 'k>(&'a self, key: &'k KeyType) -> PathIter<'a, 'k, KeyType, ValueType> {
        PathIter::new(&self.root, key)
    }
}

impl<KeyType, ValueType> TreeStatsTrait for RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        Self::get_tree_stats_recurse(&self.root, &mut stats, 1);
        stats
    }
}

// Internals implementation
impl<KeyType, ValueType> RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    fn longest_prefix_node(&self, key: &KeyType) -> Option<&Node<KeyType, ValueType>> {
        self.path(key)
            .map(|(_, node)| node)
            .filter(|node| node.is_leaf())
            .last()
    }

    /// Finds the node whose subtree holds exactly the keys starting with `prefix`: the node at
    /// which `prefix` is consumed, or the node whose own prefix `prefix` runs out inside of.
    fn seek_prefix(&self, prefix: &KeyType) -> Option<&Node<KeyType, ValueType>> {
        let mut cur_node = &self.root;
        let mut depth = 0;
        loop {
            if depth == prefix.len() {
                return Some(cur_node);
            }
            let child = cur_node.seek_child(prefix.at(depth))?;
            let prefix_common_match = child.prefix.prefix_length_key(prefix, depth);
            if depth + prefix_common_match == prefix.len() {
                return Some(child);
            }
            if prefix_common_match != child.prefix.len() {
                return None;
            }
            depth += prefix_common_match;
            cur_node = child;
        }
    }

    // `cur_node`'s prefix has already been matched; `depth` symbols of the key are behind us.
    fn insert_recurse(
        cur_node: &mut Node<KeyType, ValueType>,
        key: &KeyType,
        value: ValueType,
        depth: usize,
    ) -> Option<ValueType> {
        // Key exhausted: this node is the key's node. Either sets the value or replaces the old
        // value already here.
        if depth == key.len() {
            return match &mut cur_node.leaf {
                Some(leaf) => Some(std::mem::replace(&mut leaf.value, value)),
                None => {
                    cur_node.leaf = Some(LeafData::new(key.clone(), value));
                    None
                }
            };
        }

        let k = key.at(depth);
        let Some(child) = cur_node.seek_child_mut(k) else {
            // Nothing starts with this symbol yet; the rest of the key becomes a new leaf.
            cur_node.add_child(k, Node::new_leaf(key.to_partial(depth), key.clone(), value));
            return None;
        };

        let longest_common_prefix = child.prefix.prefix_length_key(key, depth);
        if longest_common_prefix == child.prefix.len() {
            return Self::insert_recurse(child, key, value, depth + longest_common_prefix);
        }

        // The key diverges from (or ends inside) the child's prefix. We have to break the child
        // up: a new inner node holding the common part takes its place, the old child hangs
        // below it, and the new key lands either on the inner node or on a sibling leaf.
        trace!(?key, at = depth + longest_common_prefix, "splitting node");
        child.split_prefix(longest_common_prefix);
        let depth = depth + longest_common_prefix;
        if depth == key.len() {
            child.leaf = Some(LeafData::new(key.clone(), value));
        } else {
            let new_leaf = Node::new_leaf(key.to_partial(depth), key.clone(), value);
            child.add_child(key.at(depth), new_leaf);
        }
        None
    }

    fn remove_recurse(
        parent_node: &mut Node<KeyType, ValueType>,
        key: &KeyType,
        depth: usize,
    ) -> Option<ValueType> {
        // Seek the child that matches the key at this depth, which is the first character at the
        // depth we're at.
        let c = key.at(depth);
        let child_node = parent_node.seek_child_mut(c)?;

        let prefix_common_match = child_node.prefix.prefix_length_key(key, depth);
        if prefix_common_match != child_node.prefix.len() {
            return None;
        }

        let depth = depth + prefix_common_match;
        let removed = if depth == key.len() {
            child_node.leaf.take()?.value
        } else {
            Self::remove_recurse(child_node, key, depth)?
        };

        // The child may now be wasted: with no entry it either collapses into its only child or,
        // with nothing left below it, is pruned from us. In this way the tree is restored
        // bottom-up along the path we came down.
        if child_node.compact() {
            trace!(?key, depth, "pruning empty node");
            parent_node.delete_child(c);
        }
        Some(removed)
    }

    fn remove_prefix_recurse(
        parent_node: &mut Node<KeyType, ValueType>,
        prefix: &KeyType,
        depth: usize,
    ) -> usize {
        let c = prefix.at(depth);
        let Some(child_node) = parent_node.seek_child_mut(c) else {
            return 0;
        };

        let prefix_common_match = child_node.prefix.prefix_length_key(prefix, depth);
        if depth + prefix_common_match == prefix.len() {
            // The prefix runs out at, or inside, this child: everything below it goes.
            return parent_node
                .delete_child(c)
                .map_or(0, |detached| Iter::new(Some(&detached)).count());
        }
        if prefix_common_match != child_node.prefix.len() {
            return 0;
        }

        let removed = Self::remove_prefix_recurse(child_node, prefix, depth + prefix_common_match);
        if removed > 0 && child_node.compact() {
            parent_node.delete_child(c);
        }
        removed
    }

    // Returns the entries this subtree reports to its parent.
    fn post_order_recurse<'a, F>(
        node: &'a Node<KeyType, ValueType>,
        visit: &mut F,
    ) -> Vec<Entry<'a, KeyType, ValueType>>
    where
        F: FnMut(Entry<'a, KeyType, ValueType>, &[Entry<'a, KeyType, ValueType>]),
    {
        let mut all_children = Vec::with_capacity(node.num_children());
        for child in node.children.values() {
            all_children.extend(Self::post_order_recurse(child, visit));
        }

        let Some(entry) = node.entry() else {
            // Intermediate node, not an inserted key: pass our children up in our place.
            return all_children;
        };

        visit(entry, &all_children);
        vec![entry]
    }

    fn get_tree_stats_recurse(
        node: &Node<KeyType, ValueType>,
        tree_stats: &mut TreeStats,
        height: usize,
    ) {
        update_tree_stats(tree_stats, node, height);
        for (_k, child) in node.iter() {
            Self::get_tree_stats_recurse(child, tree_stats, height + 1);
        }
    }

    /// Checks the structural invariants, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert!(self.root.prefix.is_empty(), "root must not consume symbols");
        let mut path = Vec::new();
        let count = Self::assert_node_invariants(&self.root, true, &mut path);
        assert_eq!(count, self.size, "size must match the number of stored entries");
    }

    #[cfg(test)]
    fn assert_node_invariants(
        node: &Node<KeyType, ValueType>,
        is_root: bool,
        path: &mut Vec<u8>,
    ) -> usize {
        path.extend_from_slice(node.prefix.to_slice());
        if !is_root {
            assert!(!node.prefix.is_empty(), "empty prefix below {path:?}");
            assert!(
                node.is_leaf() || node.num_children() >= 2,
                "wasted node at {path:?}"
            );
        }

        let mut count = 0;
        if let Some(leaf) = &node.leaf {
            assert!(leaf.key.matches_slice(path), "leaf key does not match its path {path:?}");
            count += 1;
        }

        let mut last_label = None;
        for (label, child) in node.iter() {
            assert_eq!(child.prefix.at(0), label, "edge label mismatch at {path:?}");
            if let Some(last_label) = last_label {
                assert!(last_label < label, "edges out of order at {path:?}");
            }
            last_label = Some(label);
            count += Self::assert_node_invariants(child, false, path);
        }

        path.truncate(path.len() - node.prefix.len());
        count
    }
}

impl<KeyType, ValueType, KV> Extend<(KV, ValueType)> for RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
    KV: Into<KeyType>,
{
    fn extend<I: IntoIterator<Item = (KV, ValueType)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<KeyType, ValueType, KV> FromIterator<(KV, ValueType)> for RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
    KV: Into<KeyType>,
{
    fn from_iter<I: IntoIterator<Item = (KV, ValueType)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<'a, KeyType, ValueType> IntoIterator for &'a RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
{
    type Item = (&'a KeyType, &'a ValueType);
    type IntoIter = Iter<'a, KeyType, ValueType>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<KeyType, ValueType> fmt::Debug for RadixTree<KeyType, ValueType>
where
    KeyType: KeyTrait,
    ValueType: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
