//! Shared error utilities used across the compilation pipeline.
//!
//! Diagnostics are kept lightweight on purpose – both error kinds render the
//! input line followed by a caret pointing at the offending byte, in the
//! style of chibicc.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  /// No token rule matched at `loc`.
  #[snafu(display("{input}\n{}^ {message}", caret_padding(input, *loc)))]
  Lex {
    input: String,
    loc: usize,
    message: String,
  },

  /// A grammar rule could not be satisfied at the token starting at `loc`.
  #[snafu(display("{input}\n{}^ {message}", caret_padding(input, *loc)))]
  Parse {
    input: String,
    loc: usize,
    message: String,
  },
}

impl CompileError {
  /// Construct a lexical error anchored at a byte offset in the input.
  pub fn lex(input: &str, loc: usize, message: impl Into<String>) -> Self {
    Self::Lex {
      input: input.to_string(),
      loc: loc.min(input.len()),
      message: message.into(),
    }
  }

  /// Construct a syntax error anchored at a byte offset in the input.
  pub fn parse(input: &str, loc: usize, message: impl Into<String>) -> Self {
    Self::Parse {
      input: input.to_string(),
      loc: loc.min(input.len()),
      message: message.into(),
    }
  }

  pub fn loc(&self) -> usize {
    match self {
      Self::Lex { loc, .. } | Self::Parse { loc, .. } => *loc,
    }
  }

  pub fn message(&self) -> &str {
    match self {
      Self::Lex { message, .. } | Self::Parse { message, .. } => message,
    }
  }

  pub fn is_lex(&self) -> bool {
    matches!(self, Self::Lex { .. })
  }

  pub fn is_parse(&self) -> bool {
    matches!(self, Self::Parse { .. })
  }
}

// The caret sits under the character at `loc`, so pad by characters rather
// than bytes when the prefix is not plain ASCII.
fn caret_padding(input: &str, loc: usize) -> String {
  let width = input.get(..loc).map_or(loc, |prefix| prefix.chars().count());
  " ".repeat(width)
}
