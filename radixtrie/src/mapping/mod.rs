pub mod sorted_keyed_mapping;

/// Edge table of a node: maps the first symbol of a child's prefix to the child.
pub trait NodeMapping<N> {
    /// Adds a child under `key`. Panics if `key` is already present.
    fn add_child(&mut self, key: u8, node: N);
    /// Replaces the child under `key`, returning the old one. Panics if `key` is absent.
    fn update_child(&mut self, key: u8, node: N) -> N;
    fn seek_child(&self, key: u8) -> Option<&N>;
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N>;
    fn delete_child(&mut self, key: u8) -> Option<N>;
    fn num_children(&self) -> usize;
}
