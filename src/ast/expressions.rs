//! Definitions for the expression nodes of the AST.
//!
//! This module contains every value-producing node:
//!
//! - Literal values and storage references (variables, arrays, indexed access)
//! - Arithmetic operators, which propagate a numeric type through `promote`
//! - Comparison and logical operators, which produce target booleans
//! - Function calls
//!
//! Expression nodes ignore the indentation level and emit inline fragments;
//! only `Funcall` honours it, because a bare call is also a valid statement.

use std::any::Any;
use std::fmt;
use std::io;

use crate::ast::ast::{indent, Node, TypedNode};
use crate::ast::types::{promote, Type};
use crate::errors::errors::CompileError;
use crate::{MK_ARITH_OP, MK_BOOL_OP};

/// Tagged payload of a literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Char(char),
    /// Character-sequence literal, stored without its delimiting quotes.
    Str(String),
}

/// Escapes a character-sequence payload for embedding between double quotes
/// in the target source. The payload is stored unescaped, so backslashes and
/// quotes must be escaped at emission to keep the generated text parseable.
pub(crate) fn escape_str(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Formats a float so the target re-parses it as a float, never an integer.
fn float_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A literal value of one of the available types. Leaf node.
#[derive(Debug, Clone)]
pub struct Value {
    literal: Literal,
    ty: Type,
}

impl Value {
    pub fn int(value: i64) -> Self {
        Value {
            literal: Literal::Int(value),
            ty: Type::Integer,
        }
    }

    pub fn float(value: f64) -> Self {
        Value {
            literal: Literal::Float(value),
            ty: Type::Float,
        }
    }

    pub fn chr(value: char) -> Self {
        Value {
            literal: Literal::Char(value),
            ty: Type::Character,
        }
    }

    /// Creates a character-array literal.
    ///
    /// The payload is normalised at construction: one pair of delimiting
    /// double quotes is stripped if present, so the stored text is the bare
    /// character sequence and its length is the effective literal length.
    pub fn str(text: &str) -> Self {
        let text = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);

        Value {
            literal: Literal::Str(text.to_string()),
            ty: Type::CharacterArray,
        }
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    /// Builder hook: overrides the type derived from the literal tag.
    /// Only meaningful while the tree is under construction.
    pub fn set_type(&mut self, ty: Type) {
        self.ty = ty;
    }
}

impl Node for Value {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match &self.literal {
            Literal::Int(v) => write!(out, "{}", v),
            Literal::Float(v) => write!(out, "{}", float_literal(*v)),
            Literal::Char(v) => write!(out, "'{}'", v),
            Literal::Str(v) => write!(out, "\"{}\"", v),
        }
    }

    fn compile(&self, out: &mut dyn io::Write, _level: usize) -> Result<(), CompileError> {
        match &self.literal {
            Literal::Int(v) => write!(out, "{}", v)?,
            Literal::Float(v) => write!(out, "{}", float_literal(*v))?,
            Literal::Char(v) => write!(out, "'{}'", v)?,
            // A char-array literal becomes a target list with a terminator
            // slot. The enclosing assignment bounds the copy to the
            // destination size; standalone emission keeps the full text.
            Literal::Str(v) => write!(out, "[c for c in \"{}\"]+[0]", escape_str(v))?,
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedNode for Value {
    fn node_type(&self) -> Type {
        self.ty
    }
}

/// Reference to a named storage slot.
#[derive(Debug, Clone)]
pub struct Variable {
    id: String,
    ty: Type,
}

impl Variable {
    pub fn new(id: impl Into<String>, ty: Type) -> Self {
        Variable { id: id.into(), ty }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Node for Variable {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}", self.id)
    }

    fn compile(&self, out: &mut dyn io::Write, _level: usize) -> Result<(), CompileError> {
        write!(out, "{}", self.id)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedNode for Variable {
    fn node_type(&self) -> Type {
        self.ty
    }
}

/// Named storage reference with a compile-time size.
///
/// Used as an assignment destination; the size is what bounds the copy loop
/// of the char-array special case. The defining occurrence is
/// `ArrayDeclaration` and indexed reads go through `ArrayAccess`.
#[derive(Debug, Clone)]
pub struct Array {
    id: String,
    size: usize,
    ty: Type,
}

impl Array {
    pub fn new(id: impl Into<String>, size: usize, ty: Type) -> Self {
        Array {
            id: id.into(),
            size,
            ty,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Node for Array {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}[{}]", self.id, self.size)
    }

    fn compile(&self, out: &mut dyn io::Write, _level: usize) -> Result<(), CompileError> {
        write!(out, "{}", self.id)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedNode for Array {
    fn node_type(&self) -> Type {
        self.ty
    }
}

/// Indexed access into an array.
///
/// The index is an arbitrary owned expression compiled inline; it is not
/// range-checked here. An out-of-range index is a target-runtime condition.
#[derive(Debug)]
pub struct ArrayAccess {
    id: String,
    ty: Type,
    index: Box<dyn Node>,
}

impl ArrayAccess {
    pub fn new(id: impl Into<String>, ty: Type, index: Box<dyn Node>) -> Self {
        ArrayAccess {
            id: id.into(),
            ty,
            index,
        }
    }

    pub fn index(&self) -> &dyn Node {
        self.index.as_ref()
    }
}

impl Node for ArrayAccess {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}[", self.id)?;
        self.index.display(out)?;
        write!(out, "]")
    }

    fn compile(&self, out: &mut dyn io::Write, _level: usize) -> Result<(), CompileError> {
        write!(out, "{}[", self.id)?;
        self.index.compile(out, 0)?;
        write!(out, "]")?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedNode for ArrayAccess {
    fn node_type(&self) -> Type {
        self.ty
    }
}

// Arithmetic operators: typed, result type fixed by `promote` at
// construction, full expression parenthesized.
MK_ARITH_OP!(AddOp, "+");
MK_ARITH_OP!(SubOp, "-");
MK_ARITH_OP!(MulOp, "*");
MK_ARITH_OP!(DivOp, "/");

// Boolean operators: untyped, emitted without an enclosing parenthesis.
MK_BOOL_OP!(EqOp, "==");
MK_BOOL_OP!(GtOp, ">");
MK_BOOL_OP!(LtOp, "<");
MK_BOOL_OP!(GeOp, ">=");
MK_BOOL_OP!(LeOp, "<=");
MK_BOOL_OP!(OrOp, " or ");
MK_BOOL_OP!(AndOp, " and ");
// True exclusive-or over the operands; comparisons produce target booleans,
// for which `^` is logical xor.
MK_BOOL_OP!(XorOp, "^");

/// Prefix negation of a single owned operand.
#[derive(Debug)]
pub struct NotOp {
    operand: Box<dyn Node>,
}

impl NotOp {
    pub fn new(operand: Box<dyn Node>) -> Self {
        NotOp { operand }
    }
}

impl Node for NotOp {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "NotOp(")?;
        self.operand.display(out)?;
        write!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, _level: usize) -> Result<(), CompileError> {
        write!(out, "not(")?;
        self.operand.compile(out, 0)?;
        write!(out, ")")?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Call of a previously declared function.
///
/// Arguments can be any typed expression (values, variables, operations,
/// other calls). The return type is resolved by the upstream validation pass
/// and handed in at construction.
#[derive(Debug)]
pub struct Funcall {
    name: String,
    args: Vec<Box<dyn TypedNode>>,
    ty: Type,
}

impl Funcall {
    pub fn new(name: impl Into<String>, args: Vec<Box<dyn TypedNode>>, ty: Type) -> Self {
        Funcall {
            name: name.into(),
            args,
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Box<dyn TypedNode>] {
        &self.args
    }
}

impl Node for Funcall {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Funcall({}, [", self.name)?;
        for arg in &self.args {
            arg.display(out)?;
            write!(out, ", ")?;
        }
        writeln!(out, "])")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        // Indented when used as a statement, inline when used as an argument.
        indent(out, level)?;
        write!(out, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(out, ",")?;
            }
            arg.compile(out, 0)?;
        }
        write!(out, ")")?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedNode for Funcall {
    fn node_type(&self) -> Type {
        self.ty
    }
}
