//! Template model and the markup-to-fragment compiler.
//!
//! A [`Template`] is an ordered sequence of literal markup segments
//! interleaved with value slots; [`compile`] turns its rendered markup into a
//! detached fragment subtree plus the dependency map derived from reference
//! attributes. The compiler never touches the live root; attaching the
//! fragment is the caller's decision.

pub mod compiler;
pub mod model;

pub use compiler::compile;
pub use model::Template;
