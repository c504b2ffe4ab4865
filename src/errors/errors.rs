use std::io;

use thiserror::Error;

/// Emission-time error.
///
/// Construction-time contract violations (attaching a second else block,
/// building an arithmetic node over character operands) are programming
/// errors and panic instead of producing a variant here. Callers that hit a
/// sink failure must discard any partially written output.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("failed to write generated code: {0}")]
    Sink(#[from] io::Error),
}
