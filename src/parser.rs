//! Recursive-descent parser producing an expression AST.
//!
//! The parser mirrors the classic chibicc structure: one helper per
//! precedence level, each folding operands of the next tighter level into a
//! left-leaning tree.
//!
//! ```text
//! expr       := equality
//! equality   := relational ("==" relational | "!=" relational)*
//! relational := add ("<" add | "<=" add | ">" add | ">=" add)*
//! add        := mul ("+" mul | "-" mul)*
//! mul        := unary ("*" unary | "/" unary)*
//! unary      := ("+" | "-")? primary
//! primary    := num | "(" expr ")"
//! ```
//!
//! `>` and `>=` never reach the tree: they become `Lt`/`Le` with the operands
//! swapped. Unary minus becomes `0 - x`.

use crate::error::{CompileError, CompileResult};
use crate::tokenizer::{Token, TokenKind, describe_token, token_text};

/// Binary operators that survive into the AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Eq,
  Ne,
  Lt,
  Le,
}

/// Expression tree produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
  Num {
    value: i32,
  },
  Binary {
    op: BinaryOp,
    lhs: Box<AstNode>,
    rhs: Box<AstNode>,
  },
}

impl AstNode {
  pub fn number(value: i32) -> Self {
    Self::Num { value }
  }

  pub fn binary(op: BinaryOp, lhs: AstNode, rhs: AstNode) -> Self {
    Self::Binary {
      op,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }

  /// Height of the tree; a lone literal has depth 1.
  pub fn depth(&self) -> usize {
    match self {
      AstNode::Num { .. } => 1,
      AstNode::Binary { lhs, rhs, .. } => 1 + lhs.depth().max(rhs.depth()),
    }
  }
}

/// Parse a complete expression, rejecting anything left over before `Eof`.
pub fn parse(tokens: Vec<Token>, source: &str) -> CompileResult<AstNode> {
  let mut stream = TokenStream::new(tokens, source);

  if stream.is_eof() {
    return Err(CompileError::parse(source, 0, "expression is empty"));
  }

  let node = parse_expr(&mut stream)?;

  if let Some(token) = stream.peek()
    && token.kind != TokenKind::Eof
  {
    let got = describe_token(Some(token), source);
    return Err(CompileError::parse(
      source,
      token.loc,
      format!("unexpected token \"{got}\""),
    ));
  }

  Ok(node)
}

fn parse_expr(stream: &mut TokenStream) -> CompileResult<AstNode> {
  parse_equality(stream)
}

fn parse_equality(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_relational(stream)?;

  loop {
    let op = match stream.peek_punctuator() {
      Some("==") => BinaryOp::Eq,
      Some("!=") => BinaryOp::Ne,
      _ => break,
    };

    stream.advance();
    let rhs = parse_relational(stream)?;
    node = AstNode::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_relational(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_add(stream)?;

  loop {
    let (op, swapped) = match stream.peek_punctuator() {
      Some("<") => (BinaryOp::Lt, false),
      Some("<=") => (BinaryOp::Le, false),
      Some(">") => (BinaryOp::Lt, true),
      Some(">=") => (BinaryOp::Le, true),
      _ => break,
    };

    stream.advance();
    let rhs = parse_add(stream)?;
    node = if swapped {
      AstNode::binary(op, rhs, node)
    } else {
      AstNode::binary(op, node, rhs)
    };
  }

  Ok(node)
}

fn parse_add(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_mul(stream)?;

  loop {
    let op = match stream.peek_punctuator() {
      Some("+") => BinaryOp::Add,
      Some("-") => BinaryOp::Sub,
      _ => break,
    };

    stream.advance();
    let rhs = parse_mul(stream)?;
    node = AstNode::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_mul(stream: &mut TokenStream) -> CompileResult<AstNode> {
  let mut node = parse_unary(stream)?;

  loop {
    let op = match stream.peek_punctuator() {
      Some("*") => BinaryOp::Mul,
      Some("/") => BinaryOp::Div,
      _ => break,
    };

    stream.advance();
    let rhs = parse_unary(stream)?;
    node = AstNode::binary(op, node, rhs);
  }

  Ok(node)
}

// A single optional sign only: `- -5` is rejected, `-(-5)` is fine.
fn parse_unary(stream: &mut TokenStream) -> CompileResult<AstNode> {
  if stream.equal("+") {
    return parse_primary(stream);
  }

  if stream.equal("-") {
    let operand = parse_primary(stream)?;
    return Ok(AstNode::binary(BinaryOp::Sub, AstNode::number(0), operand));
  }

  parse_primary(stream)
}

fn parse_primary(stream: &mut TokenStream) -> CompileResult<AstNode> {
  if stream.equal("(") {
    let node = parse_expr(stream)?;
    stream.skip(")")?;
    return Ok(node);
  }

  let value = stream.get_number()?;
  Ok(AstNode::number(value))
}

/// Lightweight cursor over the token vector. It only ever moves forward.
struct TokenStream<'a> {
  tokens: Vec<Token>,
  source: &'a str,
  pos: usize,
}

impl<'a> TokenStream<'a> {
  /// Take ownership of the token stream; the parser will advance `pos` as it consumes input.
  fn new(tokens: Vec<Token>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
    }
  }

  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.pos)
  }

  /// Source text of the current token if it is a punctuator.
  fn peek_punctuator(&self) -> Option<&'a str> {
    self
      .peek()
      .filter(|token| token.kind == TokenKind::Punctuator)
      .map(|token| token_text(token, self.source))
  }

  fn advance(&mut self) {
    if self.pos < self.tokens.len() {
      self.pos += 1;
    }
  }

  /// Consume the current token if it matches the provided punctuator.
  fn equal(&mut self, op: &str) -> bool {
    if self.peek_punctuator() == Some(op) {
      self.advance();
      return true;
    }
    false
  }

  fn skip(&mut self, s: &str) -> CompileResult<()> {
    if self.equal(s) {
      Ok(())
    } else {
      Err(self.unexpected(&format!("\"{s}\"")))
    }
  }

  /// Consume the current token as an integer literal.
  fn get_number(&mut self) -> CompileResult<i32> {
    if let Some(Token {
      kind: TokenKind::Num,
      value: Some(value),
      ..
    }) = self.peek()
    {
      let value = *value;
      self.advance();
      return Ok(value);
    }
    Err(self.unexpected("a number"))
  }

  /// Error anchored at the current token; a stream without `Eof` reports end of input.
  fn unexpected(&self, expected: &str) -> CompileError {
    let token = self.peek();
    let loc = token.map_or(self.source.len(), |token| token.loc);
    let got = describe_token(token, self.source);
    CompileError::parse(
      self.source,
      loc,
      format!("expected {expected}, but got \"{got}\""),
    )
  }

  fn is_eof(&self) -> bool {
    matches!(self.peek().map(|token| token.kind), Some(TokenKind::Eof))
  }
}
