//! flare: a minimal reactive rendering layer.
//!
//! A markup template plus a mutable state record become a live,
//! incrementally updated visual tree. There is no whole-tree diff: elements
//! declare the state properties they depend on through a `ref` attribute,
//! and a write to one property re-renders only the elements registered
//! under that name. List-rendered subtrees are recognized across re-renders
//! by a content digest (`data-hash`), so already-rendered items keep their
//! nodes, and with them any transient UI state the host associates with
//! them.
//!
//! The pieces, leaves first:
//!
//! - [`identity`]: content digests for rendered records.
//! - [`fragment`]: the arena-backed tree and the dependency map.
//! - [`template`]: templates and the markup-to-fragment compiler.
//! - [`reconcile`]: the scoped merge into the live tree.
//! - [`component`]: the reactive state container and per-instance facade.

pub use component::{
    register_shared_stylesheets, shared_stylesheets, Component, Lifecycle, ReactiveState,
    Stylesheet, TemplateFn,
};
pub use fragment::{DependencyMap, FragmentTree, NodeData, NodeKind, HASH_ATTR, REF_ATTR};
pub use identity::{digest, tag_records, HASH_FIELD};
pub use reconcile::reconcile;
pub use template::{compile, Template};
