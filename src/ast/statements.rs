//! Definitions for the statement nodes of the AST.
//!
//! This module contains every statement-level node:
//!
//! - `Block` and `Program`, the ordered owners of statement sequences
//! - Declarations and assignment, including the char-array copy loop
//! - Control structures (if/else, bounded and conditional loops)
//! - Function definitions, I/O statements and return
//!
//! Statement emission is indentation-sensitive: each node first writes
//! `level` tabs, and a `Block` compiles its children one level deeper than
//! its enclosing construct, each followed by exactly one line terminator.

use std::any::Any;
use std::fmt;
use std::io;

use tracing::{debug, trace};

use crate::ast::ast::{indent, Node, TypedNode};
use crate::ast::expressions::{escape_str, Array, Literal, Value, Variable};
use crate::ast::types::Type;
use crate::errors::errors::CompileError;

/// Ordered, owned sequence of statement nodes.
///
/// Insertion order is significant and preserved in emission. The external
/// builder fills blocks bottom-up as grammar reductions fire.
#[derive(Debug, Default)]
pub struct Block {
    instructions: Vec<Box<dyn Node>>,
}

impl Block {
    pub fn new() -> Self {
        Block::default()
    }

    /// Appends a statement to the block.
    pub fn add(&mut self, instruction: Box<dyn Node>) {
        self.instructions.push(instruction);
    }

    /// Builder hook: the most recently attached statement, if any.
    pub fn last(&self) -> Option<&dyn Node> {
        self.instructions.last().map(|node| node.as_ref())
    }
}

impl Node for Block {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "Block(")?;
        for instruction in &self.instructions {
            instruction.display(out)?;
        }
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        for instruction in &self.instructions {
            instruction.compile(out, level + 1)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Top-level owner of the whole tree.
///
/// Dropping the program drops every node it transitively owns. Top-level
/// nodes are emitted at column zero in insertion order.
#[derive(Debug, Default)]
pub struct Program {
    instructions: Vec<Box<dyn Node>>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn add(&mut self, instruction: Box<dyn Node>) {
        self.instructions.push(instruction);
    }
}

impl Node for Program {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(out, "Program(")?;
        for instruction in &self.instructions {
            instruction.display(out)?;
        }
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        debug!(nodes = self.instructions.len(), "emitting program");
        for instruction in &self.instructions {
            instruction.compile(out, level)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Defining occurrence of a variable.
///
/// The target only creates storage on first assignment, so this emits a
/// comment keeping the declared type visible in the generated source.
#[derive(Debug)]
pub struct Declaration {
    variable: Variable,
}

impl Declaration {
    pub fn new(variable: Variable) -> Self {
        Declaration { variable }
    }
}

impl Node for Declaration {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Declaration(")?;
        self.variable.display(out)?;
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        write!(out, "# {} {}", self.variable.node_type(), self.variable.id())?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Defining occurrence of a fixed-size array.
///
/// Emits an initializer for a zero-filled sequence of the declared size.
/// Size zero is legal and emits an empty sequence.
#[derive(Debug)]
pub struct ArrayDeclaration {
    array: Array,
}

impl ArrayDeclaration {
    pub fn new(id: impl Into<String>, size: usize, ty: Type) -> Self {
        ArrayDeclaration {
            array: Array::new(id, size, ty),
        }
    }
}

impl Node for ArrayDeclaration {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.array.display(out)
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        write!(
            out,
            "{}=[0 for _ in range({})]",
            self.array.id(),
            self.array.size()
        )?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Index variable of the generated char-array copy loop. Prefixed so it can
/// never collide with a source-language identifier.
const STRINGSET_INDEX: &str = "_ZZ_TRANSPILER_STRINGSET_INDEX";

/// Assignment of a value expression to a storage reference.
///
/// The destination aliases a variable introduced by a prior declaration; the
/// upstream validation pass guarantees it exists and that the types line up.
#[derive(Debug)]
pub struct Assignment {
    variable: Box<dyn TypedNode>,
    value: Box<dyn TypedNode>,
}

impl Assignment {
    pub fn new(variable: Box<dyn TypedNode>, value: Box<dyn TypedNode>) -> Self {
        Assignment { variable, value }
    }

    /// Emits the bounded copy of a string literal into a fixed-size array.
    ///
    /// The destination capacity is fixed at construction time while the
    /// literal length is only known from its text, so the copy is bounded to
    /// the smaller of the two: the array is first reset to its declared size,
    /// zero-filled, then each of the first `min(size, literal length)`
    /// characters is assigned into its slot.
    fn compile_str_copy(
        &self,
        out: &mut dyn io::Write,
        level: usize,
        array: &Array,
        text: &str,
    ) -> Result<(), CompileError> {
        let copy_len = array.size().min(text.chars().count());

        write!(out, "{}=[0 for _ in range({})]", array.id(), array.size())?;
        writeln!(out)?;
        indent(out, level)?;
        write!(out, "for {} in range({}):", STRINGSET_INDEX, copy_len)?;
        writeln!(out)?;
        indent(out, level + 1)?;
        write!(
            out,
            "{}[{}]=\"{}\"[{}]",
            array.id(),
            STRINGSET_INDEX,
            escape_str(text),
            STRINGSET_INDEX
        )?;
        Ok(())
    }
}

impl Node for Assignment {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Assignment(")?;
        self.variable.display(out)?;
        write!(out, ",")?;
        self.value.display(out)?;
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        // The special path needs the destination's declared size and the
        // literal's text; any other char-array source (a variable, an
        // indexed read, a call) falls through to the identity wrapper.
        if self.variable.node_type() == Type::CharacterArray
            && self.value.node_type() == Type::CharacterArray
        {
            if let (Some(array), Some(value)) = (
                self.variable.as_any().downcast_ref::<Array>(),
                self.value.as_any().downcast_ref::<Value>(),
            ) {
                if let Literal::Str(text) = value.literal() {
                    return self.compile_str_copy(out, level, array, text);
                }
            }
        }

        self.variable.compile(out, 0)?;
        write!(out, "=")?;
        match self.variable.node_type() {
            Type::Integer => write!(out, "int(")?,
            Type::Character => write!(out, "chr(")?,
            Type::Float => write!(out, "float(")?,
            Type::CharacterArray => write!(out, "(")?,
        }
        self.value.compile(out, 0)?;
        write!(out, ")")?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Conditional statement with an optional else branch.
#[derive(Debug)]
pub struct If {
    condition: Box<dyn Node>,
    block: Block,
    else_block: Option<Block>,
}

impl If {
    pub fn new(condition: Box<dyn Node>, block: Block) -> Self {
        If {
            condition,
            block,
            else_block: None,
        }
    }

    /// Attaches the else branch.
    ///
    /// # Panics
    ///
    /// Panics if an else branch was already attached.
    pub fn create_else(&mut self, block: Block) {
        assert!(
            self.else_block.is_none(),
            "if node already has an else block"
        );
        self.else_block = Some(block);
    }
}

impl Node for If {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "If(")?;
        self.condition.display(out)?;
        write!(out, ", ")?;
        self.block.display(out)?;
        if let Some(else_block) = &self.else_block {
            write!(out, ", Else(")?;
            else_block.display(out)?;
            writeln!(out, ")")?;
        }
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        write!(out, "if ")?;
        self.condition.compile(out, 0)?;
        writeln!(out, ":")?;
        self.block.compile(out, level)?;
        if let Some(else_block) = &self.else_block {
            indent(out, level)?;
            writeln!(out, "else:")?;
            else_block.compile(out, level)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Bounded loop over a half-open range.
///
/// The three boundary expressions are emitted verbatim; no implicit coercion
/// is applied, so callers must supply compatible operand types.
#[derive(Debug)]
pub struct For {
    var: Variable,
    begin: Box<dyn Node>,
    end: Box<dyn Node>,
    step: Box<dyn Node>,
    block: Block,
}

impl For {
    pub fn new(
        var: Variable,
        begin: Box<dyn Node>,
        end: Box<dyn Node>,
        step: Box<dyn Node>,
        block: Block,
    ) -> Self {
        For {
            var,
            begin,
            end,
            step,
            block,
        }
    }
}

impl Node for For {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "For(")?;
        self.var.display(out)?;
        write!(out, ", range(")?;
        self.begin.display(out)?;
        write!(out, ",")?;
        self.end.display(out)?;
        write!(out, ",")?;
        self.step.display(out)?;
        write!(out, "), ")?;
        self.block.display(out)?;
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        write!(out, "for ")?;
        self.var.compile(out, 0)?;
        write!(out, " in range(")?;
        self.begin.compile(out, 0)?;
        write!(out, ",")?;
        self.end.compile(out, 0)?;
        write!(out, ",")?;
        self.step.compile(out, 0)?;
        writeln!(out, "):")?;
        self.block.compile(out, level)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Conditional loop.
#[derive(Debug)]
pub struct While {
    condition: Box<dyn Node>,
    block: Block,
}

impl While {
    pub fn new(condition: Box<dyn Node>, block: Block) -> Self {
        While { condition, block }
    }
}

impl Node for While {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "While(")?;
        self.condition.display(out)?;
        write!(out, ", ")?;
        self.block.display(out)?;
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        write!(out, "while ")?;
        self.condition.compile(out, 0)?;
        writeln!(out, ":")?;
        self.block.compile(out, level)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Function definition.
///
/// Owns its parameter variables by value and its body block. The target is
/// dynamically typed, so parameter types are not re-emitted; only the
/// identifier list appears in the definition header.
#[derive(Debug)]
pub struct Function {
    id: String,
    params: Vec<Variable>,
    ty: Type,
    block: Block,
}

impl Function {
    pub fn new(id: impl Into<String>, params: Vec<Variable>, ty: Type, block: Block) -> Self {
        Function {
            id: id.into(),
            params,
            ty,
            block,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn params(&self) -> &[Variable] {
        &self.params
    }
}

impl Node for Function {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Function({}, [", self.id)?;
        for param in &self.params {
            param.display(out)?;
            write!(out, ", ")?;
        }
        write!(out, "], ")?;
        self.block.display(out)?;
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        trace!(function = %self.id, "emitting function definition");
        indent(out, level)?;
        write!(out, "def {}(", self.id)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(out, ",")?;
            }
            param.compile(out, 0)?;
        }
        writeln!(out, "):")?;
        self.block.compile(out, level)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TypedNode for Function {
    fn node_type(&self) -> Type {
        self.ty
    }
}

#[derive(Debug)]
enum PrintContent {
    /// Fixed string, stored without its delimiting quotes.
    Literal(String),
    Expression(Box<dyn Node>),
}

/// Output statement.
///
/// Holds either a fixed string or an owned expression. The target's default
/// line terminator is suppressed so consecutive prints do not inject
/// unwanted line breaks.
#[derive(Debug)]
pub struct Print {
    content: PrintContent,
}

impl Print {
    /// Creates a print of a fixed string. One pair of delimiting double
    /// quotes is stripped if present, same convention as char-array literals.
    pub fn literal(text: &str) -> Self {
        let text = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(text);

        Print {
            content: PrintContent::Literal(text.to_string()),
        }
    }

    pub fn expression(content: Box<dyn Node>) -> Self {
        Print {
            content: PrintContent::Expression(content),
        }
    }
}

impl Node for Print {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Print(")?;
        match &self.content {
            PrintContent::Literal(text) => write!(out, "\"{}\"", text)?,
            PrintContent::Expression(content) => content.display(out)?,
        }
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        write!(out, "print(")?;
        match &self.content {
            PrintContent::Literal(text) => write!(out, "\"{}\"", escape_str(text))?,
            PrintContent::Expression(content) => content.compile(out, 0)?,
        }
        write!(out, ",end=\"\")")?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Input statement.
///
/// Emits an assignment from a line of input into the destination reference,
/// wrapped in the parse call matching the destination type.
#[derive(Debug)]
pub struct Read {
    variable: Box<dyn TypedNode>,
}

impl Read {
    pub fn new(variable: Box<dyn TypedNode>) -> Self {
        Read { variable }
    }
}

impl Node for Read {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Read(")?;
        self.variable.display(out)?;
        writeln!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        self.variable.compile(out, 0)?;
        match self.variable.node_type() {
            Type::Integer => write!(out, "=int(input())")?,
            Type::Float => write!(out, "=float(input())")?,
            _ => write!(out, "=input()")?,
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Return statement.
///
/// Legality of `return` only inside a function body is validated upstream.
#[derive(Debug)]
pub struct Return {
    expr: Box<dyn Node>,
}

impl Return {
    pub fn new(expr: Box<dyn Node>) -> Self {
        Return { expr }
    }
}

impl Node for Return {
    fn display(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "Return(")?;
        self.expr.display(out)?;
        write!(out, ")")
    }

    fn compile(&self, out: &mut dyn io::Write, level: usize) -> Result<(), CompileError> {
        indent(out, level)?;
        write!(out, "return ")?;
        self.expr.compile(out, 0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
