use core::borrow::Borrow;
use core::ops::Index;

use tracing::debug;

use super::AvlTree;
use crate::raw::Threaded;
use crate::{AvlError, Rank};

impl<T: Ord> AvlTree<T> {
    /// Returns the number of elements strictly less than `value`.
    ///
    /// `value` itself need not be present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(tree.count_less(&7), 4);
    /// assert_eq!(tree.count_less(&6), 4);
    /// assert_eq!(tree.count_less(&0), 0);
    /// ```
    #[must_use]
    pub fn count_less<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_less(value)
    }

    /// Returns the number of elements strictly greater than `value`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(tree.count_greater(&7), 2);
    /// assert_eq!(tree.count_greater(&10), 0);
    /// ```
    #[must_use]
    pub fn count_greater<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_greater(value)
    }

    /// Returns the zero-based rank of `value` in sorted order, or `None` if
    /// the value is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 20]);
    ///
    /// assert_eq!(tree.rank_of(&20), Some(1));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value)?;
        Some(self.raw.count_less(value))
    }
}

impl<T> AvlTree<T> {
    /// Returns the `k`-th smallest element, counting from one.
    ///
    /// The walk threads the tree in place instead of keeping a stack, which
    /// is why this needs `&mut self`; every thread is removed before the call
    /// returns, so the tree comes back exactly as it was. For a read-only
    /// O(log n) lookup see [`get_by_rank`](AvlTree::get_by_rank).
    ///
    /// # Errors
    ///
    /// Returns [`AvlError::InvalidArgument`] if `k` is zero or greater than
    /// [`len`](AvlTree::len).
    ///
    /// # Complexity
    ///
    /// O(n) time, O(1) extra space.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlError, AvlTree};
    ///
    /// let mut tree = AvlTree::from([5, 3, 8]);
    ///
    /// assert_eq!(tree.k_smallest(1), Ok(&3));
    /// assert_eq!(tree.k_smallest(3), Ok(&8));
    /// assert_eq!(tree.k_smallest(0), Err(AvlError::InvalidArgument { k: 0, len: 3 }));
    /// ```
    pub fn k_smallest(&mut self, k: usize) -> Result<&T, AvlError> {
        let len = self.len();
        let invalid = AvlError::InvalidArgument { k, len };
        if k < 1 || k > len {
            debug!(k, len, "k_smallest rejected out-of-range k");
            return Err(invalid);
        }

        let found = Threaded::new(&mut self.raw).nth(k - 1);
        let handle = found.ok_or(invalid)?;
        Ok(self.raw.value(handle))
    }

    /// Returns the element at zero-based position `rank` in sorted order, or
    /// `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([10, 20, 30]);
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_by_rank(rank).map(|handle| self.raw.value(handle))
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTree, Rank};
///
/// let tree = AvlTree::from([10, 20, 30]);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for AvlTree<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
