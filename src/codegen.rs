//! Code generation: lower the parsed AST into Intel-syntax x86-64 assembly.
//!
//! The emitter is a plain stack machine: every leaf pushes its value, every
//! operator pops two operands into `rdi`/`rax` and pushes the result. No
//! values are kept in registers across nodes.

use tracing::trace;

use crate::parser::{AstNode, BinaryOp};

/// Emit a complete `main` that returns the value of `node`.
pub fn generate(node: &AstNode) -> String {
  let mut asm = String::new();
  asm.push_str(".intel_syntax noprefix\n");
  asm.push_str(".global main\n");
  asm.push('\n');
  asm.push_str("main:\n");

  emit_expr(node, &mut asm);

  asm.push_str("    pop rax\n");
  asm.push_str("    ret\n");

  asm
}

/// Emit stack-based code for a single expression node.
fn emit_expr(node: &AstNode, asm: &mut String) {
  match node {
    AstNode::Num { value } => {
      trace!(value, "push literal");
      asm.push_str(&format!("    push {value}\n"));
    }
    AstNode::Binary { op, lhs, rhs } => {
      emit_expr(lhs, asm);
      emit_expr(rhs, asm);
      trace!(?op, "combine operands");
      asm.push_str("    pop rdi\n");
      asm.push_str("    pop rax\n");
      match op {
        BinaryOp::Add => asm.push_str("    add rax, rdi\n"),
        BinaryOp::Sub => asm.push_str("    sub rax, rdi\n"),
        BinaryOp::Mul => asm.push_str("    imul rax, rdi\n"),
        BinaryOp::Div => {
          asm.push_str("    cqo\n");
          asm.push_str("    idiv rdi\n");
        }
        BinaryOp::Eq => emit_compare("sete", asm),
        BinaryOp::Ne => emit_compare("setne", asm),
        BinaryOp::Lt => emit_compare("setl", asm),
        BinaryOp::Le => emit_compare("setle", asm),
      }
      asm.push_str("    push rax\n");
    }
  }
}

// Leaves 0 or 1 in rax.
fn emit_compare(set: &str, asm: &mut String) {
  asm.push_str("    cmp rax, rdi\n");
  asm.push_str(&format!("    {set} al\n"));
  asm.push_str("    movzb rax, al\n");
}
