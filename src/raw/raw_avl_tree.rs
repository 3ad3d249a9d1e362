use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use tracing::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// The core AVL tree implementation backing `AvlTree`.
///
/// Every recursive mutation takes a subtree root and hands back the root of
/// the (possibly rotated) subtree; callers always store the returned handle
/// in the link they recursed through.
#[derive(Clone)]
pub(crate) struct RawAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of elements in the tree.
    len: usize,
}

impl<T> RawAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.nodes.get(handle).value()
    }

    // ─── Balancing engine ────────────────────────────────────────────────────

    /// Height of the subtree behind `link`; an empty link has height 0.
    #[inline]
    pub(crate) fn height(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |h| self.nodes.get(h).height())
    }

    /// Number of nodes in the subtree behind `link`.
    #[inline]
    pub(crate) fn size(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |h| self.nodes.get(h).size())
    }

    /// `height(left) - height(right)` for a non-empty node.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn balance_factor(&self, handle: Handle) -> isize {
        let node = self.nodes.get(handle);
        self.height(node.left()) as isize - self.height(node.right()) as isize
    }

    /// Recomputes the cached height and size of `handle` from its children.
    fn update(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let height = 1 + self.height(left).max(self.height(right));
        let size = 1 + self.size(left) + self.size(right);
        self.nodes.get_mut(handle).set_metrics(height, size);
    }

    /// Promotes the left child of a left-heavy node.
    pub(crate) fn rotate_right(&mut self, handle: Handle) -> Handle {
        let pivot = self
            .nodes
            .get(handle)
            .left()
            .expect("`RawAvlTree::rotate_right()` - node has no left child!");
        let inner = self.nodes.get(pivot).right();

        self.nodes.get_mut(handle).set_left(inner);
        self.update(handle);
        self.nodes.get_mut(pivot).set_right(Some(handle));
        self.update(pivot);

        trace!(from = handle.to_index(), to = pivot.to_index(), "rotate right");
        pivot
    }

    /// Promotes the right child of a right-heavy node.
    pub(crate) fn rotate_left(&mut self, handle: Handle) -> Handle {
        let pivot = self
            .nodes
            .get(handle)
            .right()
            .expect("`RawAvlTree::rotate_left()` - node has no right child!");
        let inner = self.nodes.get(pivot).left();

        self.nodes.get_mut(handle).set_right(inner);
        self.update(handle);
        self.nodes.get_mut(pivot).set_left(Some(handle));
        self.update(pivot);

        trace!(from = handle.to_index(), to = pivot.to_index(), "rotate left");
        pivot
    }

    pub(crate) fn rotate_left_right(&mut self, handle: Handle) -> Handle {
        let left = self
            .nodes
            .get(handle)
            .left()
            .expect("`RawAvlTree::rotate_left_right()` - node has no left child!");
        let left = self.rotate_left(left);
        self.nodes.get_mut(handle).set_left(Some(left));
        self.rotate_right(handle)
    }

    pub(crate) fn rotate_right_left(&mut self, handle: Handle) -> Handle {
        let right = self
            .nodes
            .get(handle)
            .right()
            .expect("`RawAvlTree::rotate_right_left()` - node has no right child!");
        let right = self.rotate_right(right);
        self.nodes.get_mut(handle).set_right(Some(right));
        self.rotate_left(handle)
    }

    /// Refreshes `handle` and restores the AVL invariant at it.
    ///
    /// Both children must already satisfy the invariant and differ in height
    /// by at most two. Returns the new subtree root.
    pub(crate) fn balance(&mut self, handle: Handle) -> Handle {
        self.update(handle);
        let factor = self.balance_factor(handle);
        let node = self.nodes.get(handle);

        if factor > 1 {
            // A balanced left child only shows up after a delete; it needs the
            // single rotation too or the old left child ends up two too tall.
            let left = node.left().expect("`RawAvlTree::balance()` - left-heavy node has no left child!");
            if self.balance_factor(left) >= 0 {
                self.rotate_right(handle)
            } else {
                self.rotate_left_right(handle)
            }
        } else if factor < -1 {
            let right = node.right().expect("`RawAvlTree::balance()` - right-heavy node has no right child!");
            if self.balance_factor(right) > 0 {
                self.rotate_right_left(handle)
            } else {
                self.rotate_left(handle)
            }
        } else {
            handle
        }
    }

    // ─── Lookups ─────────────────────────────────────────────────────────────

    /// Leftmost node of a subtree.
    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Rightmost node of a subtree.
    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    /// Finds the zero-based `rank`-th node using the cached subtree sizes.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;

        loop {
            let node = self.nodes.get(current);
            let left_size = self.size(node.left());
            match remaining.cmp(&left_size) {
                Less => current = node.left()?,
                Equal => return Some(current),
                Greater => {
                    remaining -= left_size + 1;
                    current = node.right()?;
                }
            }
        }
    }
}

impl<T: Ord> RawAvlTree<T> {
    /// Searches for a value and returns its node if present.
    pub(crate) fn search<Q>(&self, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match value.cmp(node.value().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    /// Number of elements strictly less than `value`.
    pub(crate) fn count_less<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match node.value().borrow().cmp(value) {
                Equal => return count + self.size(node.left()),
                Less => {
                    count += 1 + self.size(node.left());
                    current = node.right();
                }
                Greater => current = node.left(),
            }
        }
        count
    }

    /// Number of elements strictly greater than `value`.
    pub(crate) fn count_greater<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match node.value().borrow().cmp(value) {
                Equal => return count + self.size(node.right()),
                Greater => {
                    count += 1 + self.size(node.right());
                    current = node.left();
                }
                Less => current = node.right(),
            }
        }
        count
    }

    // ─── Mutation ────────────────────────────────────────────────────────────

    /// Inserts `value`. Returns `false` and leaves the tree untouched if an
    /// equal value is already present.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = self.insert_at(self.root, value);
        self.root = Some(root);
        debug_assert_eq!(
            self.nodes.len(),
            self.len,
            "insert: tracked length drifted from node count"
        );
        inserted
    }

    fn insert_at(&mut self, link: Option<Handle>, value: T) -> (Handle, bool) {
        let Some(handle) = link else {
            let handle = self.nodes.alloc(Node::new(value));
            self.len += 1;
            return (handle, true);
        };

        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let inserted = match value.cmp(node.value()) {
            Less => {
                let (left, inserted) = self.insert_at(left, value);
                self.nodes.get_mut(handle).set_left(Some(left));
                inserted
            }
            Greater => {
                let (right, inserted) = self.insert_at(right, value);
                self.nodes.get_mut(handle).set_right(Some(right));
                inserted
            }
            Equal => {
                trace!(node = handle.to_index(), "insert of present value ignored");
                return (handle, false);
            }
        };

        if inserted {
            (self.balance(handle), true)
        } else {
            (handle, false)
        }
    }

    /// Removes the value equal to `value` and returns it, or `None` if absent.
    pub(crate) fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (root, removed) = self.remove_at(self.root, value);
        self.root = root;
        debug_assert_eq!(
            self.nodes.len(),
            self.len,
            "remove: tracked length drifted from node count"
        );
        if removed.is_none() {
            trace!("remove of absent value ignored");
        }
        removed
    }

    fn remove_at<Q>(&mut self, link: Option<Handle>, value: &Q) -> (Option<Handle>, Option<T>)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = link else {
            return (None, None);
        };

        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        match value.cmp(node.value().borrow()) {
            Less => {
                let (left, removed) = self.remove_at(left, value);
                if removed.is_none() {
                    return (Some(handle), None);
                }
                self.nodes.get_mut(handle).set_left(left);
                (Some(self.balance(handle)), removed)
            }
            Greater => {
                let (right, removed) = self.remove_at(right, value);
                if removed.is_none() {
                    return (Some(handle), None);
                }
                self.nodes.get_mut(handle).set_right(right);
                (Some(self.balance(handle)), removed)
            }
            Equal => {
                self.len -= 1;
                match (left, right) {
                    (None, _) => (right, Some(self.nodes.take(handle).into_value())),
                    (Some(_), None) => (left, Some(self.nodes.take(handle).into_value())),
                    (Some(_), Some(right)) => {
                        let (right, successor) = self.detach_minimum(right);
                        let node = self.nodes.get_mut(handle);
                        node.set_right(right);
                        let removed = node.replace_value(successor);
                        (Some(self.balance(handle)), Some(removed))
                    }
                }
            }
        }
    }

    /// Unlinks the leftmost node of a subtree and returns the new subtree
    /// root along with the unlinked value.
    fn detach_minimum(&mut self, handle: Handle) -> (Option<Handle>, T) {
        let node = self.nodes.get(handle);
        match node.left() {
            None => {
                let right = node.right();
                (right, self.nodes.take(handle).into_value())
            }
            Some(left) => {
                let (left, minimum) = self.detach_minimum(left);
                self.nodes.get_mut(handle).set_left(left);
                (Some(self.balance(handle)), minimum)
            }
        }
    }
}

#[cfg(test)]
impl<T: Ord> RawAvlTree<T> {
    /// Walks the whole tree and panics on any broken invariant.
    pub(crate) fn assert_invariants(&self) {
        let (height, size) = self.check_subtree(self.root, None, None);
        assert_eq!(size, self.len, "tracked length disagrees with node count");
        assert_eq!(size, self.nodes.len(), "arena holds unreachable nodes");
        assert_eq!(height, self.height(self.root));
    }

    fn check_subtree(&self, link: Option<Handle>, lower: Option<&T>, upper: Option<&T>) -> (usize, usize) {
        let Some(handle) = link else {
            return (0, 0);
        };
        let node = self.nodes.get(handle);
        let value = node.value();
        assert!(lower.is_none_or(|lower| lower < value), "left-bound violated");
        assert!(upper.is_none_or(|upper| value < upper), "right-bound violated");

        let (left_height, left_size) = self.check_subtree(node.left(), lower, Some(value));
        let (right_height, right_size) = self.check_subtree(node.right(), Some(value), upper);
        assert!(left_height.abs_diff(right_height) <= 1, "node out of balance");

        let height = 1 + left_height.max(right_height);
        let size = 1 + left_size + right_size;
        assert_eq!(node.height(), height, "stale cached height");
        assert_eq!(node.size(), size, "stale cached size");
        (height, size)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn tree_of(values: &[i32]) -> RawAvlTree<i32> {
        let mut tree = RawAvlTree::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    fn shape(tree: &RawAvlTree<i32>, link: Option<Handle>, out: &mut Vec<(i32, usize)>) {
        if let Some(handle) = link {
            let node = tree.node(handle);
            out.push((*node.value(), node.height()));
            shape(tree, node.left(), out);
            shape(tree, node.right(), out);
        }
    }

    fn preorder_with_heights(tree: &RawAvlTree<i32>) -> Vec<(i32, usize)> {
        let mut out = Vec::new();
        shape(tree, tree.root(), &mut out);
        out
    }

    #[test]
    fn empty_tree() {
        let tree: RawAvlTree<i32> = RawAvlTree::new();
        assert_eq!(tree.height(tree.root()), 0);
        assert_eq!(tree.size(tree.root()), 0);
        assert!(tree.search(&1).is_none());
        assert_eq!(tree.count_less(&1), 0);
        assert_eq!(tree.count_greater(&1), 0);
        tree.assert_invariants();
    }

    #[test]
    fn ascending_inserts_rotate_left() {
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(preorder_with_heights(&tree), [(2, 2), (1, 1), (3, 1)]);
        tree.assert_invariants();
    }

    #[test]
    fn descending_inserts_rotate_right() {
        let tree = tree_of(&[3, 2, 1]);
        assert_eq!(preorder_with_heights(&tree), [(2, 2), (1, 1), (3, 1)]);
        tree.assert_invariants();
    }

    #[test]
    fn zig_zag_inserts_rotate_twice() {
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(preorder_with_heights(&tree), [(2, 2), (1, 1), (3, 1)]);

        let tree = tree_of(&[1, 3, 2]);
        assert_eq!(preorder_with_heights(&tree), [(2, 2), (1, 1), (3, 1)]);
    }

    #[test]
    fn delete_with_balanced_left_child_uses_single_rotation() {
        //        8
        //      /   \
        //     4     9
        //    / \     \
        //   2   6     10
        //  / \ / \
        // 1  3 5  7
        let mut tree = tree_of(&[8, 4, 9, 2, 6, 10, 1, 3, 5, 7]);
        tree.assert_invariants();

        // Dropping 10 leaves 8 left-heavy while 4 is itself balanced.
        assert_eq!(tree.remove(&10), Some(10));
        tree.assert_invariants();
        assert_eq!(*tree.value(tree.root().unwrap()), 4);

        assert_eq!(tree.remove(&9), Some(9));
        tree.assert_invariants();
    }

    #[test]
    fn delete_two_children_pulls_successor() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(*tree.value(tree.root().unwrap()), 7);
        assert_eq!(tree.len(), 6);
        tree.assert_invariants();
    }

    #[test]
    fn delete_each_branch_decrements_once() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9, 10]);
        // leaf
        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(tree.len(), 7);
        // right child only
        assert_eq!(tree.remove(&9), Some(9));
        assert_eq!(tree.len(), 6);
        // two children
        assert_eq!(tree.remove(&8), Some(8));
        assert_eq!(tree.len(), 5);
        // absent
        assert_eq!(tree.remove(&42), None);
        assert_eq!(tree.len(), 5);
        tree.assert_invariants();
    }

    #[test]
    fn delete_single_child_below_root() {
        // The detached child must come from the node being deleted.
        let mut tree = tree_of(&[10, 5, 20, 15]);
        assert_eq!(tree.remove(&20), Some(20));
        tree.assert_invariants();
        assert!(tree.search(&15).is_some());
        assert!(tree.search(&5).is_some());
    }

    #[test]
    fn get_by_rank_walks_sizes() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let ranked: Vec<i32> = (0..tree.len()).map(|r| *tree.value(tree.get_by_rank(r).unwrap())).collect();
        assert_eq!(ranked, [1, 3, 4, 5, 7, 8, 9]);
        assert!(tree.get_by_rank(7).is_none());
    }

    #[test]
    fn minimum_and_maximum() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(tree.minimum(root)), 1);
        assert_eq!(*tree.value(tree.maximum(root)), 9);
    }

    proptest! {
        #[test]
        fn invariants_hold_under_random_ops(ops in prop::collection::vec((any::<bool>(), -200i32..200), 0..600)) {
            let mut tree = RawAvlTree::new();
            let mut model = BTreeSet::new();

            for (insert, value) in ops {
                if insert {
                    prop_assert_eq!(tree.insert(value), model.insert(value));
                } else {
                    prop_assert_eq!(tree.remove(&value), model.take(&value));
                }
                tree.assert_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }
        }

        #[test]
        fn rank_counts_partition_len(values in prop::collection::vec(-500i32..500, 0..300), probe in -600i32..600) {
            let tree = tree_of(&values);
            let present = usize::from(tree.search(&probe).is_some());
            prop_assert_eq!(tree.count_less(&probe) + tree.count_greater(&probe) + present, tree.len());
        }
    }
}
