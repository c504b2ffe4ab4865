use std::{env, fs::{self, File}, io::{BufWriter, Write as _}, path::PathBuf, time::Instant};

use transpiler::ast::ast::Node;
use transpiler::ast::expressions::{AddOp, Array, Funcall, GtOp, Value, Variable};
use transpiler::ast::statements::{
    ArrayDeclaration, Assignment, Block, Declaration, For, Function, If, Print, Program, Return,
};
use transpiler::ast::types::Type;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let out_path = if args.len() == 2 {
        PathBuf::from(&args[1])
    } else {
        if !PathBuf::from("build").exists() {
            fs::create_dir("build").unwrap();
        }
        PathBuf::from("build/out.py")
    };

    let program = sample_program();

    let mut trace = String::new();
    program.display(&mut trace).unwrap();
    println!("{}", trace);

    let start = Instant::now();
    let file = File::create(&out_path).expect("Failed to create output file!");
    let mut writer = BufWriter::new(file);
    program.compile(&mut writer, 0).expect("Failed to emit program!");
    writer.flush().expect("Failed to flush output file!");

    println!("Emitted {} in {:?}", out_path.display(), start.elapsed());
}

/// Builds the demo tree by hand, the way the external builder would during
/// grammar reductions.
fn sample_program() -> Program {
    let mut program = Program::new();

    // def add(a,b): return (a+b)
    let mut body = Block::new();
    body.add(Box::new(Return::new(Box::new(AddOp::new(
        Box::new(Variable::new("a", Type::Integer)),
        Box::new(Variable::new("b", Type::Integer)),
    )))));
    program.add(Box::new(Function::new(
        "add",
        vec![
            Variable::new("a", Type::Integer),
            Variable::new("b", Type::Integer),
        ],
        Type::Integer,
        body,
    )));

    // x = add(1,2), then print whether it is large
    program.add(Box::new(Declaration::new(Variable::new(
        "x",
        Type::Integer,
    ))));
    program.add(Box::new(Assignment::new(
        Box::new(Variable::new("x", Type::Integer)),
        Box::new(Funcall::new(
            "add",
            vec![Box::new(Value::int(1)), Box::new(Value::int(2))],
            Type::Integer,
        )),
    )));

    let mut then_block = Block::new();
    then_block.add(Box::new(Print::literal("big")));
    let mut else_block = Block::new();
    else_block.add(Box::new(Print::literal("small")));
    let mut branch = If::new(
        Box::new(GtOp::new(
            Box::new(Variable::new("x", Type::Integer)),
            Box::new(Value::int(2)),
        )),
        then_block,
    );
    branch.create_else(else_block);
    program.add(Box::new(branch));

    // count to ten
    let mut loop_body = Block::new();
    loop_body.add(Box::new(Print::expression(Box::new(Variable::new(
        "i",
        Type::Integer,
    )))));
    program.add(Box::new(For::new(
        Variable::new("i", Type::Integer),
        Box::new(Value::int(0)),
        Box::new(Value::int(10)),
        Box::new(Value::int(1)),
        loop_body,
    )));

    // fixed-size char array holding a greeting
    program.add(Box::new(ArrayDeclaration::new(
        "greeting",
        8,
        Type::CharacterArray,
    )));
    program.add(Box::new(Assignment::new(
        Box::new(Array::new("greeting", 8, Type::CharacterArray)),
        Box::new(Value::str("hi")),
    )));

    program
}
