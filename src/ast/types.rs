//! Type system definitions for the AST.
//!
//! This module defines the small type lattice of the source language and the
//! promotion rule for binary arithmetic:
//!
//! - The four primitive types (integers, floats, characters, character arrays)
//! - The `promote` function selecting the result type of arithmetic nodes
//!
//! Types are assigned to nodes when the external builder constructs them and
//! never change afterwards. Character types only ever appear in declaration,
//! access, assignment, print and read contexts; feeding one to `promote` is a
//! contract violation and panics.

use std::fmt::{self, Display};

/// The primitive types of the source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Integer,
    Float,
    Character,
    /// Fixed-size character array. The size lives on the storage node, not on
    /// the type.
    CharacterArray,
}

impl Type {
    /// Returns whether the type is valid as an arithmetic operand.
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Integer | Type::Float)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Character => write!(f, "char"),
            Type::CharacterArray => write!(f, "char[]"),
        }
    }
}

/// Selects the result type of a binary arithmetic operation.
///
/// Returns `Integer` iff both operands are `Integer`, otherwise `Float`.
///
/// # Panics
///
/// Panics if either operand is `Character` or `CharacterArray`. Arithmetic
/// nodes call this at construction time, so an invalid operand is rejected
/// before the node exists.
pub fn promote(left: Type, right: Type) -> Type {
    assert!(
        left.is_numeric() && right.is_numeric(),
        "cannot promote non-numeric operand types {} and {}",
        left,
        right
    );

    if left == Type::Integer && right == Type::Integer {
        Type::Integer
    } else {
        Type::Float
    }
}
