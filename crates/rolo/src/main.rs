#![forbid(unsafe_code)]

//! rolo: a line-command contact manager with whole-store undo/redo.
//!
//! Reads one command per line from stdin, applies it to the versioned
//! address book, and prints one feedback line per command. All state is
//! in-memory and dies with the process.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::command::{Command, ParseError};
use crate::shell::{Outcome, Shell};

mod command;
mod shell;

/// Line-command contact manager with undo/redo.
#[derive(Debug, Parser)]
#[command(name = "rolo", version, about)]
struct Cli {
    /// Suppress the interactive prompt (for piped input).
    #[arg(long)]
    quiet: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut shell = Shell::new();

    if !cli.quiet {
        write!(stdout, "rolo> ")?;
        stdout.flush()?;
    }
    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(command) => match shell.execute(command) {
                Outcome::Continue(message) => writeln!(stdout, "{message}")?,
                Outcome::Exit => break,
            },
            // A blank line is not worth an error message.
            Err(ParseError::Empty) => {}
            Err(error) => writeln!(stdout, "Error: {error}")?,
        }
        if !cli.quiet {
            write!(stdout, "rolo> ")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
