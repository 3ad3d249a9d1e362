use smallvec::SmallVec;

use super::handle::Handle;
use super::raw_avl_tree::RawAvlTree;

/// Visiting order of a [`Walk`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Order {
    In,
    Pre,
    Post,
}

/// Stack entry: a node and whether its children have already been pushed.
#[derive(Clone, Copy)]
struct Frame {
    node: Handle,
    expanded: bool,
}

/// Depth-first read-only walk over a tree.
///
/// Each node is pushed once unexpanded and once expanded; the push order on
/// expansion picks the traversal. The stack holds about two frames per
/// level of the tree.
pub(crate) struct Walk<'a, T> {
    tree: &'a RawAvlTree<T>,
    order: Order,
    stack: SmallVec<[Frame; 64]>,
    remaining: usize,
}

impl<'a, T> Walk<'a, T> {
    pub(crate) fn new(tree: &'a RawAvlTree<T>, order: Order) -> Self {
        let mut stack = SmallVec::new();
        if let Some(root) = tree.root() {
            stack.push(Frame {
                node: root,
                expanded: false,
            });
        }
        Self {
            tree,
            order,
            stack,
            remaining: tree.len(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.remaining
    }

    fn push(&mut self, link: Option<Handle>) {
        if let Some(node) = link {
            self.stack.push(Frame { node, expanded: false });
        }
    }

    fn push_expanded(&mut self, node: Handle) {
        self.stack.push(Frame { node, expanded: true });
    }
}

impl<T> Clone for Walk<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            order: self.order,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Walk<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some(Frame { node, expanded }) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some(self.tree.value(node));
            }

            let tree = self.tree;
            let (left, right) = (tree.node(node).left(), tree.node(node).right());
            match self.order {
                Order::In => {
                    self.push(right);
                    self.push_expanded(node);
                    self.push(left);
                }
                Order::Pre => {
                    self.push(right);
                    self.push(left);
                    self.push_expanded(node);
                }
                Order::Post => {
                    self.push_expanded(node);
                    self.push(right);
                    self.push(left);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn sample() -> RawAvlTree<i32> {
        let mut tree = RawAvlTree::new();
        for value in [5, 3, 8, 1, 4, 7, 9] {
            tree.insert(value);
        }
        tree
    }

    fn collect(tree: &RawAvlTree<i32>, order: Order) -> Vec<i32> {
        Walk::new(tree, order).copied().collect()
    }

    #[test]
    fn orders() {
        let tree = sample();
        assert_eq!(collect(&tree, Order::In), [1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(collect(&tree, Order::Pre), [5, 3, 1, 4, 8, 7, 9]);
        assert_eq!(collect(&tree, Order::Post), [1, 4, 3, 7, 9, 8, 5]);
    }

    #[test]
    fn remaining_counts_down() {
        let tree = sample();
        let mut walk = Walk::new(&tree, Order::Post);
        assert_eq!(walk.remaining(), 7);
        walk.next();
        walk.next();
        assert_eq!(walk.size_hint(), (5, Some(5)));
    }

    #[test]
    fn empty_walk() {
        let tree: RawAvlTree<i32> = RawAvlTree::new();
        assert_eq!(Walk::new(&tree, Order::In).next(), None);
    }
}
