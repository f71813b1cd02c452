mod arena;
mod check;
mod handle;
mod node;
mod raw_rb_tree;

pub(crate) use handle::Handle;
pub use node::Color;
pub(crate) use raw_rb_tree::RawRbTree;
