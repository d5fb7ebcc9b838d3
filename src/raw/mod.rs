mod arena;
mod bst;
mod handle;
mod node;
mod rbtree;

pub(crate) use rbtree::RawRbTree;
