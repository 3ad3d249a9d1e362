/// A zero-based rank into the sorted order of a tree.
///
/// [`AvlTree::k_smallest`](crate::AvlTree::k_smallest) counts from one; a
/// `Rank` counts from zero, so `tree[Rank(k - 1)]` and `tree.k_smallest(k)`
/// name the same element.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTree, Rank};
///
/// let tree = AvlTree::from([30, 10, 20]);
///
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
