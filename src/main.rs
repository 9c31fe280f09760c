use std::env;
use std::ffi::OsString;
use std::process;

use tracing_subscriber::EnvFilter;

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn main() {
  init_logging();

  let args: Vec<OsString> = env::args_os().collect();
  if args.len() != 2 {
    let program = args
      .first()
      .map(|arg| arg.to_string_lossy().into_owned())
      .unwrap_or_else(|| "ucc".to_string());
    eprintln!("usage: {program} <expr>");
    process::exit(1);
  }

  // Invalid UTF-8 turns into U+FFFD, which the tokenizer rejects with a caret
  // under the offending character.
  let expr = args[1].to_string_lossy();

  match ucc::generate_assembly(&expr) {
    Ok(asm) => print!("{asm}"),
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  }
}
