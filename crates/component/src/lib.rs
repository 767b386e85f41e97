//! Reactive state container and the per-instance component facade.
//!
//! A write to a state property drives the whole cycle: list items are
//! content-hashed, the value is committed, the template is recompiled, the
//! reconciler merges the result into the live tree scoped to the written
//! property, and the registered effect hooks run. Reads pass through
//! untouched.

pub mod facade;
pub mod lifecycle;
pub mod state;
pub mod styles;

pub use facade::{Component, TemplateFn};
pub use lifecycle::Lifecycle;
pub use state::ReactiveState;
pub use styles::{register_shared_stylesheets, shared_stylesheets, Stylesheet};
