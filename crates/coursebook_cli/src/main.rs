//! Line-oriented coursebook driver.
//!
//! # Responsibility
//! - Read one command per line from stdin and print the rendered result.
//! - Configure core logging from the environment when requested.
//!
//! Prompts, menus, and terminal clearing are intentionally absent; the
//! driver is usable from scripts and pipes.

use coursebook_core::{default_log_level, execute, init_logging, Command, CommandOutcome, Registry};
use log::info;
use std::io::{self, BufRead, Write};

const LOG_LEVEL_ENV: &str = "COURSEBOOK_LOG_LEVEL";
const LOG_DIR_ENV: &str = "COURSEBOOK_LOG_DIR";
const FAREWELL: &str = "Thank you for using coursebook!";

fn main() {
    configure_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run(stdin.lock(), stdout.lock()) {
        eprintln!("coursebook: i/o error: {err}");
        std::process::exit(1);
    }
}

fn configure_logging() {
    let Ok(log_dir) = std::env::var(LOG_DIR_ENV) else {
        return;
    };
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("coursebook: logging disabled: {err}");
    }
}

/// Executes each input line against a fresh registry until `quit` or EOF.
fn run(input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let mut registry = Registry::new();
    writeln!(output, "coursebook version={}", coursebook_core::core_version())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = Command::parse(&line).and_then(|command| execute(&mut registry, command));
        match result {
            Ok(CommandOutcome::Output(text)) => writeln!(output, "{text}")?,
            Ok(CommandOutcome::Quit) => break,
            Err(err) => writeln!(output, "{err}")?,
        }
    }

    info!(
        "event=session_end module=cli status=ok people={} courses={}",
        registry.people().len(),
        registry.courses().len()
    );
    writeln!(output, "{FAREWELL}")?;
    output.flush()
}
