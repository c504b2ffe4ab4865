//! Core AST definitions and traits.
//!
//! This module defines the two traversal contracts every node satisfies:
//!
//! - `display` writes a deterministic structural trace to a diagnostic sink
//! - `compile` writes target-language text to an explicit output sink
//!
//! Each concrete node owns its emission logic; there is no central dispatch
//! over a node-kind tag. The tree is built once by the external builder and
//! is read-only afterwards, so every edge is a plainly owned `Box` and no
//! reference counting is involved.

use std::any::Any;
use std::fmt::Debug;
use std::{fmt, io};

use crate::errors::errors::CompileError;
use crate::ast::types::Type;

/// Behavior shared by every node of the tree.
pub trait Node: Debug {
    /// Writes a structural trace of the node to the diagnostic sink.
    ///
    /// Calling this twice on an unmodified tree yields byte-identical text.
    /// It never touches the compile output.
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Writes the target-language text for the node to the output sink.
    ///
    /// `level` controls leading indentation for statement-level nodes only;
    /// expression-level nodes ignore it and emit an inline fragment. A sink
    /// failure aborts the traversal and the partial output must be discarded.
    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError>;

    /// Type conversion purposes - used with `.downcast_ref::<T>()`
    fn as_any(&self) -> &dyn Any;
}

/// A node that carries a source-language type.
///
/// Implemented by every value-producing expression that can participate in
/// assignment or promotion.
pub trait TypedNode: Node {
    /// Returns the type assigned to the node at construction.
    fn node_type(&self) -> Type;
}

/// Writes `level` leading tabs to the output sink.
pub fn indent(out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
    for _ in 0..level {
        out.write_all(b"\t")?;
    }
    Ok(())
}
