//! Error types for code emission.
//!
//! This module defines the error type returned by the code-generation
//! traversal. It includes:
//!
//! - The `CompileError` enum wrapping output-sink failures
//!
//! Emission never fails because of tree content: a tree that satisfies the
//! construction invariants always compiles. The only runtime failure surface
//! is the output sink itself, and a sink failure aborts the whole traversal.

pub mod errors;
