use super::handle::Handle;
use super::raw_avl_tree::RawAvlTree;

/// In-order walk that keeps no stack.
///
/// Before descending into a left subtree, the walk points the subtree's
/// rightmost node back at the current node (a thread) and follows that
/// thread later to climb back up; the thread is cut on the second visit.
/// Threads are plain right links, so while the walk is alive the tree is not
/// a valid search tree. Dropping the walk cuts every thread still in place,
/// however early iteration stopped.
pub(crate) struct Threaded<'a, T> {
    tree: &'a mut RawAvlTree<T>,
    current: Option<Handle>,
}

impl<'a, T> Threaded<'a, T> {
    pub(crate) fn new(tree: &'a mut RawAvlTree<T>) -> Self {
        let current = tree.root();
        Self { tree, current }
    }

    /// Rightmost node of `left`, stopping early at a thread back to `target`.
    fn predecessor(&self, left: Handle, target: Handle) -> Handle {
        let mut pre = left;
        while let Some(right) = self.tree.node(pre).right() {
            if right == target {
                break;
            }
            pre = right;
        }
        pre
    }
}

impl<T> Iterator for Threaded<'_, T> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        while let Some(current) = self.current {
            let node = self.tree.node(current);
            let (left, right) = (node.left(), node.right());

            let Some(left) = left else {
                self.current = right;
                return Some(current);
            };

            let pre = self.predecessor(left, current);
            if self.tree.node(pre).right() == Some(current) {
                // Second visit: the left subtree is done.
                self.tree.node_mut(pre).set_right(None);
                self.current = right;
                return Some(current);
            }

            self.tree.node_mut(pre).set_right(Some(current));
            self.current = Some(left);
        }
        None
    }
}

impl<T> Drop for Threaded<'_, T> {
    fn drop(&mut self) {
        // Outstanding threads all hang off ancestors whose left subtree holds
        // `current`, and each is reached by following right links from here.
        // Unthreaded left subtrees along the way are skipped, not entered.
        while let Some(current) = self.current.take() {
            let node = self.tree.node(current);
            let right = node.right();
            if let Some(left) = node.left() {
                let pre = self.predecessor(left, current);
                if self.tree.node(pre).right() == Some(current) {
                    self.tree.node_mut(pre).set_right(None);
                }
            }
            self.current = right;
        }
    }
}
