use core::fmt;
use core::iter::FusedIterator;

use super::AvlTree;
use crate::raw::{Order, Walk};

impl<T> AvlTree<T> {
    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// Same as [`inorder`](AvlTree::inorder).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.inorder()
    }

    /// Visits every element left subtree first, then the node, then the
    /// right subtree, which is ascending order.
    ///
    /// # Complexity
    ///
    /// O(n) for the full walk, O(log n) extra space.
    pub fn inorder(&self) -> Iter<'_, T> {
        Iter {
            walk: Walk::new(&self.raw, Order::In),
        }
    }

    /// Visits every node before its subtrees, left subtree first.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(tree.preorder().copied().collect::<Vec<_>>(), [5, 3, 1, 4, 8, 7, 9]);
    /// ```
    pub fn preorder(&self) -> Preorder<'_, T> {
        Preorder {
            walk: Walk::new(&self.raw, Order::Pre),
        }
    }

    /// Visits every node after both of its subtrees, left subtree first.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree = AvlTree::from([5, 3, 8, 1, 4, 7, 9]);
    /// assert_eq!(tree.postorder().copied().collect::<Vec<_>>(), [1, 4, 3, 7, 9, 8, 5]);
    /// ```
    pub fn postorder(&self) -> Postorder<'_, T> {
        Postorder {
            walk: Walk::new(&self.raw, Order::Post),
        }
    }
}

macro_rules! traversal_iter {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[must_use = "iterators are lazy and do nothing unless consumed"]
        pub struct $name<'a, T: 'a> {
            walk: Walk<'a, T>,
        }

        impl<'a, T> Iterator for $name<'a, T> {
            type Item = &'a T;

            fn next(&mut self) -> Option<&'a T> {
                self.walk.next()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.walk.size_hint()
            }
        }

        impl<T> ExactSizeIterator for $name<'_, T> {
            fn len(&self) -> usize {
                self.walk.remaining()
            }
        }

        impl<T> FusedIterator for $name<'_, T> {}

        impl<T> Clone for $name<'_, T> {
            fn clone(&self) -> Self {
                $name { walk: self.walk.clone() }
            }
        }

        impl<T: fmt::Debug> fmt::Debug for $name<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.clone()).finish()
            }
        }
    };
}

traversal_iter! {
    /// An iterator over the elements of an `AvlTree` in ascending order.
    ///
    /// This `struct` is created by the [`iter`] and [`inorder`] methods on
    /// [`AvlTree`]. See their documentation for more.
    ///
    /// [`iter`]: AvlTree::iter
    /// [`inorder`]: AvlTree::inorder
    Iter
}

traversal_iter! {
    /// An iterator over the elements of an `AvlTree`, each node before its
    /// subtrees.
    ///
    /// This `struct` is created by [`AvlTree::preorder`].
    Preorder
}

traversal_iter! {
    /// An iterator over the elements of an `AvlTree`, each node after its
    /// subtrees.
    ///
    /// This `struct` is created by [`AvlTree::postorder`].
    Postorder
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn every_order_visits_every_element() {
        let tree: AvlTree<i32> = (0..64).map(|i| (i * 13) % 67).collect();
        let mut preorder: Vec<i32> = tree.preorder().copied().collect();
        let mut postorder: Vec<i32> = tree.postorder().copied().collect();
        preorder.sort_unstable();
        postorder.sort_unstable();
        let inorder: Vec<i32> = tree.inorder().copied().collect();
        assert_eq!(preorder, inorder);
        assert_eq!(postorder, inorder);
        assert_eq!(tree.preorder().next(), tree.postorder().last());
    }

    #[test]
    fn exact_size_and_fused() {
        let tree = AvlTree::from([1, 2, 3]);
        let mut iter = tree.postorder();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.by_ref().for_each(drop);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn traversals_are_restartable() {
        let tree = AvlTree::from([4, 2, 6, 1, 3]);
        let first: Vec<_> = tree.inorder().collect();
        let second: Vec<_> = tree.inorder().collect();
        assert_eq!(first, second);
    }
}
