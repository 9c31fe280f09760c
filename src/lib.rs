//! Crate root: wires together the compilation pipeline.
//!
//! The stages are small and composable:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and returns the expression AST.
//! - `codegen` lowers the AST into x86-64 Intel-syntax assembly.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod codegen;
pub mod error;
pub mod parser;
pub mod tokenizer;

use tracing::debug;

pub use error::{CompileError, CompileResult};

/// Compile an expression into assembly for a `main` that returns its value.
///
/// Output is all-or-nothing: on error no assembly is produced.
pub fn generate_assembly(expr: &str) -> CompileResult<String> {
  let tokens = tokenizer::tokenize(expr)?;
  debug!(
    count = tokens.len(),
    tokens = %tokenizer::render_tokens(&tokens, expr),
    "tokenized input"
  );

  let ast = parser::parse(tokens, expr)?;
  debug!(depth = ast.depth(), "parsed expression");

  let asm = codegen::generate(&ast);
  debug!(lines = asm.lines().count(), "generated assembly");
  Ok(asm)
}
