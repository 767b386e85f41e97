//! Arena-backed visual tree shared by the compiler, the reconciler, and the
//! component facade.
//!
//! Every component instance owns one [`FragmentTree`]: a single arena holding
//! the live root plus every fragment compiled over the instance's lifetime.
//! Nodes are addressed by opaque [`indextree::NodeId`] handles, so dependency
//! maps can reference the same element from several entries without aliasing
//! concerns. Detached subtrees stay allocated, which keeps outstanding handles
//! valid rather than dangling.

pub mod depmap;
pub mod printing;
pub mod tree;

pub use depmap::DependencyMap;
pub use tree::{FragmentTree, NodeData, NodeKind, HASH_ATTR, REF_ATTR};
