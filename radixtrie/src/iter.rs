use crate::keys::KeyTrait;
use crate::node::Node;
use crate::partials::Partial;

/// Pre-order iterator over the entries of a subtree. Children are visited in ascending edge
/// order, so keys come out in ascending lexicographic order.
pub struct Iter<'a, K: KeyTrait, V> {
    node_iter_stack: Vec<std::slice::Iter<'a, Node<K, V>>>,
    pending: Option<&'a Node<K, V>>,
}

impl<'a, K: KeyTrait, V> Iter<'a, K, V> {
    pub(crate) fn new(node: Option<&'a Node<K, V>>) -> Self {
        Self {
            node_iter_stack: Vec::new(),
            pending: node,
        }
    }
}

impl<'a, K: KeyTrait, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // A pending node is reported (if it holds an entry) before any of its children; its child
        // iterator then goes on top of the stack. Otherwise pull the next sibling off the top
        // iterator, popping exhausted iterators as we go.
        loop {
            if let Some(node) = self.pending.take() {
                self.node_iter_stack.push(node.children.values());
                if let Some(entry) = node.entry() {
                    return Some(entry);
                }
                continue;
            }

            let last_iter = self.node_iter_stack.last_mut()?;
            match last_iter.next() {
                Some(child) => self.pending = Some(child),
                None => {
                    self.node_iter_stack.pop();
                }
            }
        }
    }
}

/// Iterates the nodes on the path from the root toward `key`, yielding each node whose prefix was
/// fully consumed together with the number of key symbols consumed once that node is reached.
/// Stops when the key runs out, no edge matches the next symbol, or an edge only partially
/// matches.
pub(crate) struct PathIter<'a, 'k, K: KeyTrait, V> {
    next: Option<&'a Node<K, V>>,
    key: &'k K,
    depth: usize,
}

impl<'a, 'k, K: KeyTrait, V> PathIter<'a, 'k, K, V> {
    pub(crate) fn new(root: &'a Node<K, V>, key: &'k K) -> Self {
        Self {
            next: Some(root),
            key,
            depth: root.prefix.len(),
        }
    }
}

impl<'a, K: KeyTrait, V> Iterator for PathIter<'a, '_, K, V> {
    type Item = (usize, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        let depth = self.depth;

        if depth < self.key.len() {
            if let Some(child) = node.seek_child(self.key.at(depth)) {
                let prefix_common_match = child.prefix.prefix_length_key(self.key, depth);
                if prefix_common_match == child.prefix.len() {
                    self.depth += prefix_common_match;
                    self.next = Some(child);
                }
            }
        }

        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use crate::keys::vector_key::VectorKey;
    use crate::tree::RadixTree;

    #[test]
    fn test_iter_preorder() {
        let mut tree = RadixTree::<VectorKey, i32>::new();
        for (i, k) in ["b", "a", "ab", "", "abc", "ba", "c"].iter().enumerate() {
            tree.insert(*k, i as i32);
        }
        let keys: Vec<String> = tree.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["", "a", "ab", "abc", "b", "ba", "c"]);
    }

    #[test]
    fn test_iter_empty() {
        let tree = RadixTree::<VectorKey, i32>::new();
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_path_stops_mid_edge() {
        let mut tree = RadixTree::<VectorKey, i32>::new();
        tree.insert("abcd", 1);
        tree.insert("abxy", 2);

        // "abc" ends inside the "cd" edge; only the root and the "ab" branch are consumed.
        let key: VectorKey = "abc".into();
        let path: Vec<usize> = tree.path(&key).map(|(depth, _)| depth).collect();
        assert_eq!(path, vec![0, 2]);

        let key: VectorKey = "abcdzz".into();
        let path: Vec<usize> = tree.path(&key).map(|(depth, _)| depth).collect();
        assert_eq!(path, vec![0, 2, 4]);
    }
}
