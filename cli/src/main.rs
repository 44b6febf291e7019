use bfi_interpreter::{Config, Engine, Error, LineSource, Reporter, Session, Warning};

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use rustyline::error::ReadlineError;
use std::io::{self, stdin, stdout, Write};

const HELLO_WORLD: &str = "++++++++++[>+>+++>+++++++>++++++++++<<<<-]>>>++.>+.+++++++..+++.<<++.>>+++++.------------.---.+++++++++++++.-------------.";

/// Interactive command line interpreter for the brainfuck language.
///
/// Every line typed at the prompt is executed right away against a tape that
/// is kept for the whole session. Cells stay in the ASCII range and the
/// cursor stays on the tape; a loop must be closed on the line that opens it.
#[derive(Parser, Debug)]
#[command(version, after_help = format!("Example:\n  {HELLO_WORLD}"))]
struct Args {
    /// Number of cells on the tape (at least 30000)
    #[arg(long, default_value_t = bfi_interpreter::config::MIN_TAPE_CAPACITY)]
    tape_capacity: usize,

    /// Longest line, in bytes, that will be executed
    #[arg(long, default_value_t = bfi_interpreter::config::DEFAULT_MAX_LINE_LENGTH)]
    max_line_length: usize,

    /// Maximum number of loops open at the same time
    #[arg(long, default_value_t = bfi_interpreter::config::DEFAULT_LOOP_CAPACITY)]
    loop_capacity: usize,

    /// Print the cells around the cursor after every line
    #[arg(long)]
    show_tape: bool,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            tape_capacity: args.tape_capacity,
            max_line_length: args.max_line_length,
            loop_capacity: args.loop_capacity,
        }
    }
}

/// Line editor backed prompt.
struct Prompt(rustyline::Editor<()>);

impl LineSource for Prompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<Vec<u8>>> {
        println!();
        match self.0.readline(prompt) {
            Ok(line) => {
                self.0.add_history_entry(line.as_str());
                Ok(Some(line.into_bytes()))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(io::Error::new(io::ErrorKind::Other, err.to_string())),
        }
    }
}

/// Warnings go to stderr, input prompts to stdout.
struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn warning(&mut self, warning: Warning) {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }

    fn input_requested(&mut self, cursor: usize) {
        print!("\t<? INPUT [{cursor}]> ");
        // Nothing to do about a failed flush of a prompt.
        let _ = stdout().flush();
    }
}

fn report_fatal(err: &Error) -> ! {
    let _ = stdout().flush();
    eprintln!("{} {}", "Error:".red().bold(), err);
    std::process::exit(1);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = Config::from(&args);

    println!(
        "BrainFuck interpreter - version : {}",
        env!("CARGO_PKG_VERSION")
    );
    println!("Exit: Ctrl + D");

    let editor = rustyline::Editor::<()>::new().context("Unable to start the line editor")?;
    let engine = Engine::new(stdin(), stdout(), TerminalReporter);
    let mut session = Session::new(&config, Prompt(editor), engine)
        .context("Invalid interpreter configuration")?;

    let result = if args.show_tape {
        session.run_with(|state| println!("\n{state}"))
    } else {
        session.run()
    };
    if let Err(err) = result {
        report_fatal(&err);
    }
    println!();
    Ok(())
}
