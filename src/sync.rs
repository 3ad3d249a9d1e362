//! A lock-guarded [`AvlTree`] for sharing between threads.

use core::borrow::Borrow;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use alloc::vec::Vec;

use crate::{AvlError, AvlTree};

/// An [`AvlTree`] behind a readers-writer lock.
///
/// Inserts, deletes and [`k_smallest`](SharedAvlTree::k_smallest) take the
/// write lock. `k_smallest` is logically a read, but it threads the tree in
/// place while it walks, so no other reader may look at the tree until it
/// finishes. Everything else takes the read lock and may run concurrently.
///
/// Mutations compare on the way down and relink on the way up, so a panicking
/// `Ord` or a full arena leaves the tree untouched. Poisoning is therefore
/// ignored.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use avl_ost::SharedAvlTree;
///
/// let tree = Arc::new(SharedAvlTree::new());
/// let workers: Vec<_> = (0..4)
///     .map(|w| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || {
///             for i in 0..100 {
///                 tree.insert(w * 100 + i);
///             }
///         })
///     })
///     .collect();
/// for worker in workers {
///     worker.join().unwrap();
/// }
///
/// assert_eq!(tree.len(), 400);
/// assert_eq!(tree.k_smallest(400), Ok(399));
/// ```
#[derive(Debug)]
pub struct SharedAvlTree<T> {
    inner: RwLock<AvlTree<T>>,
}

impl<T> Default for SharedAvlTree<T> {
    fn default() -> Self {
        SharedAvlTree::new()
    }
}

impl<T> SharedAvlTree<T> {
    /// Makes a new, empty shared tree.
    #[must_use]
    pub const fn new() -> Self {
        SharedAvlTree {
            inner: RwLock::new(AvlTree::new()),
        }
    }

    /// Consumes the lock and returns the tree.
    pub fn into_inner(self) -> AvlTree<T> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Holds the read lock for the duration of `f`.
    ///
    /// Use this to run several queries against one consistent snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&AvlTree<T>) -> R) -> R {
        f(&self.read_guard())
    }

    /// Holds the write lock for the duration of `f`.
    pub fn write<R>(&self, f: impl FnOnce(&mut AvlTree<T>) -> R) -> R {
        f(&mut self.write_guard())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, AvlTree<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, AvlTree<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Ord> SharedAvlTree<T> {
    /// See [`AvlTree::insert`].
    pub fn insert(&self, value: T) -> bool {
        self.write_guard().insert(value)
    }

    /// See [`AvlTree::delete`].
    pub fn delete<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.write_guard().delete(value)
    }

    /// See [`AvlTree::contains`].
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.read_guard().contains(value)
    }

    /// See [`AvlTree::count_less`].
    pub fn count_less<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.read_guard().count_less(value)
    }

    /// See [`AvlTree::count_greater`].
    pub fn count_greater<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.read_guard().count_greater(value)
    }
}

impl<T: Clone> SharedAvlTree<T> {
    /// Returns a copy of the element equal to `value`, if any.
    pub fn search<Q>(&self, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        self.read_guard().search(value).cloned()
    }

    /// Returns a copy of the `k`-th smallest element, counting from one.
    ///
    /// Takes the write lock; see the type-level documentation.
    ///
    /// # Errors
    ///
    /// Returns [`AvlError::InvalidArgument`] if `k` is outside `1..=len`.
    pub fn k_smallest(&self, k: usize) -> Result<T, AvlError> {
        self.write_guard().k_smallest(k).cloned()
    }

    /// Snapshot of the elements in ascending order.
    pub fn inorder(&self) -> Vec<T> {
        self.read_guard().inorder().cloned().collect()
    }

    /// Snapshot of the elements in preorder.
    pub fn preorder(&self) -> Vec<T> {
        self.read_guard().preorder().cloned().collect()
    }

    /// Snapshot of the elements in postorder.
    pub fn postorder(&self) -> Vec<T> {
        self.read_guard().postorder().cloned().collect()
    }
}

impl<T> From<AvlTree<T>> for SharedAvlTree<T> {
    fn from(tree: AvlTree<T>) -> Self {
        SharedAvlTree {
            inner: RwLock::new(tree),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn readers_and_k_smallest_interleave() {
        let tree = SharedAvlTree::from((0..500).collect::<AvlTree<i32>>());

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for k in 1..=500 {
                        assert_eq!(tree.k_smallest(k), Ok(i32::try_from(k - 1).unwrap()));
                    }
                });
            }
            for _ in 0..4 {
                scope.spawn(|| {
                    for probe in 0..500 {
                        assert_eq!(tree.count_less(&probe), usize::try_from(probe).unwrap());
                        assert!(tree.contains(&probe));
                    }
                });
            }
        });

        let expected: Vec<i32> = (0..500).collect();
        assert_eq!(tree.inorder(), expected);
    }

    #[test]
    fn writers_and_readers_interleave() {
        let tree = SharedAvlTree::new();

        thread::scope(|scope| {
            for worker in 0..4 {
                let tree = &tree;
                scope.spawn(move || {
                    for i in 0..250 {
                        tree.insert(worker * 1000 + i);
                        if i % 2 == 1 {
                            assert!(tree.delete(&(worker * 1000 + i)));
                        }
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..100 {
                    let snapshot = tree.inorder();
                    assert!(snapshot.windows(2).all(|pair| pair[0] < pair[1]));
                    tree.read(|inner| {
                        assert_eq!(inner.count_greater(&-1), inner.len());
                        inner.assert_invariants();
                    });
                }
            });
        });

        assert_eq!(tree.len(), 500);
        tree.read(AvlTree::assert_invariants);
    }

    #[test]
    fn poisoned_lock_still_usable() {
        let tree = SharedAvlTree::from(AvlTree::from([1, 2, 3]));
        let result = thread::scope(|scope| {
            scope
                .spawn(|| {
                    let guard = tree.inner.write().unwrap();
                    assert!(guard.is_empty(), "poison");
                })
                .join()
        });
        assert!(result.is_err());
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.into_inner().len(), 3);
    }
}
