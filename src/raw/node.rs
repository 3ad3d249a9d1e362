use super::handle::Handle;

/// A single AVL node.
///
/// `height` and `size` cache the recursive definitions for the subtree rooted
/// here; whoever re-links a child must refresh them afterwards (see
/// `RawAvlTree::update`). Morris threading is the one exception: threads are
/// not real children and never touch the cache.
#[derive(Clone)]
pub(crate) struct Node<T> {
    value: T,
    left: Option<Handle>,
    right: Option<Handle>,
    // A tree of `Handle::MAX` nodes is well under 64 levels deep.
    height: u8,
    size: usize,
}

impl<T> Node<T> {
    /// Creates a detached leaf.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
            size: 1,
        }
    }

    #[inline]
    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    /// Swaps in a new value, returning the old one.
    pub(crate) fn replace_value(&mut self, value: T) -> T {
        core::mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        usize::from(self.height)
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Stores freshly computed subtree metrics.
    pub(crate) fn set_metrics(&mut self, height: usize, size: usize) {
        self.height = u8::try_from(height).expect("`Node::set_metrics()` - `height` exceeds `u8::MAX`!");
        self.size = size;
    }
}
