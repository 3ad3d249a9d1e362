use core::borrow::Borrow;
use core::fmt;

use crate::raw::RawAvlTree;

mod capacity;
mod order_statistic;
mod traversal;

pub use traversal::{Iter, Postorder, Preorder};

/// An ordered set of unique values stored in an AVL tree.
///
/// Every node caches the height and size of its subtree, so insertion,
/// deletion, lookup and the rank queries [`count_less`] and [`count_greater`]
/// all run in O(log n). The tree stays height balanced: the heights of the two
/// subtrees of any node differ by at most one.
///
/// Nodes live in a single arena and refer to each other by index, so the tree
/// never holds a dangling link, and released slots are reused by later
/// inserts.
///
/// It is a logic error for a value to be modified in such a way that its
/// ordering relative to any other value, as determined by the [`Ord`] trait,
/// changes while it is in the tree.
///
/// [`count_less`]: AvlTree::count_less
/// [`count_greater`]: AvlTree::count_greater
///
/// # Examples
///
/// ```
/// use avl_ost::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for value in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(value);
/// }
///
/// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
/// assert_eq!(tree.k_smallest(4), Ok(&5));
/// assert_eq!(tree.count_less(&7), 4);
/// assert_eq!(tree.count_greater(&7), 2);
///
/// assert!(tree.delete(&5));
/// assert!(tree.search(&5).is_none());
/// assert_eq!(tree.len(), 6);
/// ```
pub struct AvlTree<T> {
    raw: RawAvlTree<T>,
}

impl<T> AvlTree<T> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree: AvlTree<i32> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlTree { raw: RawAvlTree::new() }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[doc(alias = "size")]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single node.
    ///
    /// The AVL invariant bounds this by roughly `1.44 * log2(len + 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree: AvlTree<i32> = (1..=7).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height(self.raw.root())
    }

    /// Removes every element.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest element, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([4, 2, 9]);
    /// assert_eq!(tree.first(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[doc(alias = "minimum")]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let root = self.raw.root()?;
        Some(self.raw.value(self.raw.minimum(root)))
    }

    /// Returns the largest element, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[doc(alias = "maximum")]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let root = self.raw.root()?;
        Some(self.raw.value(self.raw.maximum(root)))
    }
}

impl<T: Ord> AvlTree<T> {
    /// Adds a value to the tree.
    ///
    /// Returns whether the value was newly inserted. If an equal value is
    /// already present the tree is left exactly as it was and `false` is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert_eq!(tree.insert(2), true);
    /// assert_eq!(tree.insert(2), false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// Removes a value from the tree. Returns whether it was present.
    ///
    /// Deleting a value that is not present is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::from([1, 2]);
    ///
    /// assert_eq!(tree.delete(&2), true);
    /// assert_eq!(tree.delete(&2), false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[doc(alias = "remove")]
    pub fn delete<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::from([String::from("a"), String::from("b")]);
    ///
    /// assert_eq!(tree.take("a"), Some(String::from("a")));
    /// assert_eq!(tree.take("a"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value)
    }

    /// Returns a reference to the element equal to `value`, if any.
    ///
    /// The value may be any borrowed form of the element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([1, 2, 3]);
    /// assert_eq!(tree.search(&2), Some(&2));
    /// assert_eq!(tree.search(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[doc(alias = "get")]
    #[must_use]
    pub fn search<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value).map(|handle| self.raw.value(handle))
    }

    /// Returns `true` if the tree contains a value equal to `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value).is_some()
    }
}

#[cfg(test)]
impl<T: Ord> AvlTree<T> {
    pub(crate) fn assert_invariants(&self) {
        self.raw.assert_invariants();
    }
}

impl<T: Clone> Clone for AvlTree<T> {
    fn clone(&self) -> Self {
        AvlTree { raw: self.raw.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        AvlTree::new()
    }
}

/// Two trees are equal when they hold the same elements, whatever their shape.
impl<T: PartialEq> PartialEq for AvlTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTree<T> {}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlTree<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn debug_prints_as_set() {
        let tree = AvlTree::from([3, 1, 2]);
        assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
    }

    #[test]
    fn equality_ignores_shape() {
        let ascending: AvlTree<i32> = (1..=10).collect();
        let descending: AvlTree<i32> = (1..=10).rev().collect();
        assert_eq!(ascending, descending);
        assert_ne!(ascending, AvlTree::from([1, 2, 3]));
    }

    #[test]
    fn clone_is_independent() {
        let mut tree = AvlTree::from([1, 2, 3]);
        let copy = tree.clone();
        tree.delete(&2);
        assert!(copy.contains(&2));
        assert!(!tree.contains(&2));
        tree.raw.assert_invariants();
        copy.raw.assert_invariants();
    }

    #[test]
    fn insert_into_full_tree_keeps_len_exact() {
        let mut tree: AvlTree<u32> = AvlTree::new();
        let mut next = 0;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            for value in 0..=u32::from(u16::MAX) {
                tree.insert(value);
                next = value + 1;
            }
        }));
        assert!(result.is_err());

        let len = tree.len();
        assert_eq!(len, tree.inorder().count());
        assert_eq!(len, usize::try_from(next).unwrap());
        assert_eq!(tree.k_smallest(len), Ok(&(next - 1)));
        assert!(!tree.contains(&next));
        tree.raw.assert_invariants();
    }

    #[test]
    fn extend_by_reference() {
        let mut tree: AvlTree<i32> = AvlTree::new();
        tree.extend(&[3, 1, 3, 2]);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn clear_then_reuse() {
        let mut tree: AvlTree<i32> = (0..100).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first(), None);
        tree.insert(5);
        assert_eq!(tree.first(), Some(&5));
        assert_eq!(tree.last(), Some(&5));
        tree.raw.assert_invariants();
    }
}
