//! Executes the instruction subset emitted by `ucc` so tests can check the
//! value `main` would return without an assembler or linker.

use std::cmp::Ordering;

#[derive(Default)]
struct Machine {
  rax: i64,
  rdi: i64,
  stack: Vec<i64>,
  flags: Option<Ordering>,
}

impl Machine {
  fn reg(&mut self, name: &str) -> Result<&mut i64, String> {
    match name {
      "rax" => Ok(&mut self.rax),
      "rdi" => Ok(&mut self.rdi),
      other => Err(format!("unknown register {other}")),
    }
  }

  fn pop(&mut self) -> Result<i64, String> {
    self.stack.pop().ok_or_else(|| "pop from empty stack".to_string())
  }

  fn set_al(&mut self, cond: bool) {
    self.rax = (self.rax & !0xff) | i64::from(cond);
  }

  fn flags(&self) -> Result<Ordering, String> {
    self.flags.ok_or_else(|| "setcc before cmp".to_string())
  }
}

/// Run `main` from the assembly text and return `rax` at `ret`.
pub fn run(asm: &str) -> Result<i64, String> {
  let mut lines = asm.lines().skip_while(|line| line.trim() != "main:");
  lines.next().ok_or_else(|| "missing main label".to_string())?;

  let mut m = Machine::default();
  for line in lines {
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    let (op, args) = line.split_once(' ').unwrap_or((line, ""));
    let args: Vec<&str> = args.split(',').map(str::trim).filter(|a| !a.is_empty()).collect();

    match (op, args.as_slice()) {
      ("push", [src]) => {
        let value = match *src {
          "rax" => m.rax,
          "rdi" => m.rdi,
          imm => imm
            .parse::<i64>()
            .map_err(|err| format!("bad immediate {imm}: {err}"))?,
        };
        m.stack.push(value);
      }
      ("pop", [dst]) => {
        let value = m.pop()?;
        *m.reg(dst)? = value;
      }
      ("add", ["rax", "rdi"]) => m.rax = m.rax.wrapping_add(m.rdi),
      ("sub", ["rax", "rdi"]) => m.rax = m.rax.wrapping_sub(m.rdi),
      ("imul", ["rax", "rdi"]) => m.rax = m.rax.wrapping_mul(m.rdi),
      ("cqo", []) => {}
      ("idiv", ["rdi"]) => {
        if m.rdi == 0 {
          return Err("division by zero".to_string());
        }
        m.rax = m.rax.wrapping_div(m.rdi);
      }
      ("cmp", ["rax", "rdi"]) => m.flags = Some(m.rax.cmp(&m.rdi)),
      ("sete", ["al"]) => {
        let cond = m.flags()? == Ordering::Equal;
        m.set_al(cond);
      }
      ("setne", ["al"]) => {
        let cond = m.flags()? != Ordering::Equal;
        m.set_al(cond);
      }
      ("setl", ["al"]) => {
        let cond = m.flags()? == Ordering::Less;
        m.set_al(cond);
      }
      ("setle", ["al"]) => {
        let cond = m.flags()? != Ordering::Greater;
        m.set_al(cond);
      }
      ("movzb", ["rax", "al"]) => m.rax &= 0xff,
      ("ret", []) => {
        if !m.stack.is_empty() {
          return Err(format!("{} values left on the stack", m.stack.len()));
        }
        return Ok(m.rax);
      }
      _ => return Err(format!("unsupported instruction: {line}")),
    }
  }

  Err("fell off the end of main".to_string())
}

/// Compile `expr` and evaluate the result.
pub fn eval(expr: &str) -> i64 {
  let asm = ucc::generate_assembly(expr).unwrap_or_else(|err| panic!("{err}"));
  run(&asm).unwrap_or_else(|err| panic!("{expr}: {err}\n{asm}"))
}
