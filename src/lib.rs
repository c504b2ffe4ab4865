//! Code-generation back end of a transpiler for a small imperative language.
//!
//! The crate consumes a fully built, type-annotated program tree and emits
//! equivalent Python source text. It exposes no parsing surface of its own:
//! an external builder constructs the nodes bottom-up and wires them into
//! blocks, and a prior validation pass has already checked names and types.
//!
//! Every node supports two independent traversals: `display`, a deterministic
//! structural trace for diagnostics, and `compile`, the actual emission into
//! an explicit output sink. The tree is immutable once built and is walked
//! exactly once per compilation, depth-first, with no intermediate
//! representation.

#![allow(clippy::module_inception)]

pub mod ast;
pub mod errors;
pub mod macros;
