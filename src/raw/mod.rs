mod arena;
mod handle;
mod morris;
mod node;
mod raw_avl_tree;
mod walk;

pub(crate) use morris::Threaded;
pub(crate) use raw_avl_tree::RawAvlTree;
pub(crate) use walk::{Order, Walk};
