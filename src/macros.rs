//! Utility macros for the node model.
//!
//! This module defines helper macros used by the expression module:
//!
//! - `MK_ARITH_OP!` - Creates a typed, promotion-propagating arithmetic node
//! - `MK_BOOL_OP!` - Creates an untyped, boolean-producing comparison node
//!
//! These macros reduce boilerplate in the binary-operator implementations.
//! All twelve binary operators share the same storage shape and only differ
//! in the emitted operator text and in whether they carry a numeric type.

/// Creates an arithmetic binary-operation node.
///
/// The generated struct owns its two typed operands and stores the result
/// type computed by `promote` at construction time. Emission parenthesizes
/// the whole expression: `(left OP right)`.
///
/// # Arguments
///
/// * `$name` - The node type name
/// * `$op` - The operator text emitted between the operands
///
/// # Example
///
/// ```ignore
/// MK_ARITH_OP!(AddOp, "+");
/// ```
#[macro_export]
macro_rules! MK_ARITH_OP {
    ($name:ident, $op:literal) => {
        #[derive(Debug)]
        pub struct $name {
            left: Box<dyn TypedNode>,
            right: Box<dyn TypedNode>,
            ty: Type,
        }

        impl $name {
            /// Panics if either operand has a character type.
            pub fn new(left: Box<dyn TypedNode>, right: Box<dyn TypedNode>) -> Self {
                let ty = promote(left.node_type(), right.node_type());
                Self { left, right, ty }
            }
        }

        impl Node for $name {
            fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                write!(out, concat!(stringify!($name), "("))?;
                self.left.display(out)?;
                write!(out, ", ")?;
                self.right.display(out)?;
                write!(out, ")")
            }

            fn compile(
                &self,
                out: &mut dyn io::Write,
                _level: usize,
            ) -> Result<(), CompileError> {
                write!(out, "(")?;
                self.left.compile(out, 0)?;
                write!(out, $op)?;
                self.right.compile(out, 0)?;
                write!(out, ")")?;
                Ok(())
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        impl TypedNode for $name {
            fn node_type(&self) -> Type {
                self.ty
            }
        }
    };
}

/// Creates a boolean binary-operation node.
///
/// The generated struct owns two untyped operands and emits
/// `left OP right` without an enclosing parenthesis, matching the target's
/// operator precedence. Boolean nodes never carry a numeric type.
///
/// # Arguments
///
/// * `$name` - The node type name
/// * `$op` - The operator text emitted between the operands
///
/// # Example
///
/// ```ignore
/// MK_BOOL_OP!(OrOp, " or ");
/// ```
#[macro_export]
macro_rules! MK_BOOL_OP {
    ($name:ident, $op:literal) => {
        #[derive(Debug)]
        pub struct $name {
            left: Box<dyn Node>,
            right: Box<dyn Node>,
        }

        impl $name {
            pub fn new(left: Box<dyn Node>, right: Box<dyn Node>) -> Self {
                Self { left, right }
            }
        }

        impl Node for $name {
            fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                write!(out, concat!(stringify!($name), "("))?;
                self.left.display(out)?;
                write!(out, ", ")?;
                self.right.display(out)?;
                write!(out, ")")
            }

            fn compile(
                &self,
                out: &mut dyn io::Write,
                _level: usize,
            ) -> Result<(), CompileError> {
                self.left.compile(out, 0)?;
                write!(out, $op)?;
                self.right.compile(out, 0)?;
                Ok(())
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}
