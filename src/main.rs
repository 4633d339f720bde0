use std::fs::read_to_string;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::diagnostics::Diagnostics;
use crate::repl::MultilineInput;
use crate::scanner::{tokenize, ErrorReporter};

mod diagnostics;
mod repl;
mod scanner;
mod token;

/// Exit status for a script that did not scan cleanly.
const EXIT_DATA_ERROR: i32 = 65;

/// Scan a Lox script, or lines typed at the prompt, and print the tokens.
#[derive(Parser, Debug)]
#[command(name = "rlox", version, about, long_about = None)]
struct Cli {
    /// Script to scan. Starts a prompt when omitted.
    script: Option<PathBuf>,

    /// Log scanner activity (RUST_LOG takes precedence)
    #[arg(short, long, env = "RLOX_VERBOSE")]
    verbose: bool,

    /// Disable colors in log output
    #[arg(long, env = "RLOX_NO_COLOR")]
    no_color: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("file does not seem to exist {0}")]
    FileDoesNotExist(PathBuf),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

fn main() -> Result<(), color_eyre::eyre::Error> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color)?;

    match cli.script {
        Some(path) => {
            debug!(path = %path.display(), "scanning file");
            if !run_file(&path)? {
                exit(EXIT_DATA_ERROR);
            }
        }
        None => {
            debug!("starting prompt");
            run_prompt()?;
        }
    }
    Ok(())
}

fn init_logging(verbose: bool, no_color: bool) -> Result<(), CliError> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}

/// Returns whether the file scanned without lexical errors.
fn run_file(path: &Path) -> Result<bool, CliError> {
    if !path.try_exists()? {
        return Err(CliError::FileDoesNotExist(path.to_path_buf()));
    }
    let source = read_to_string(path)?;
    let mut diagnostics = Diagnostics::stderr();
    run(&source, &mut io::stdout().lock(), &mut diagnostics)?;
    Ok(!diagnostics.had_error())
}

fn run_prompt() -> Result<(), CliError> {
    fn prompt() -> io::Result<()> {
        print!("> ");
        io::stdout().flush()
    }

    let mut diagnostics = Diagnostics::stderr();
    prompt()?;
    for entry in MultilineInput::new(io::stdin().lock().lines()) {
        run(&entry?, &mut io::stdout().lock(), &mut diagnostics)?;
        diagnostics.reset();
        prompt()?;
    }
    Ok(())
}

fn run<W: Write, R: ErrorReporter>(
    source: &str,
    writer: &mut W,
    reporter: &mut R,
) -> io::Result<()> {
    for token in tokenize(source, reporter) {
        writeln!(writer, "{token}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::run;
    use crate::scanner::ScanningError;

    #[test]
    fn test_run_prints_one_token_per_line() {
        let mut output = Vec::new();
        let mut errors: Vec<ScanningError> = vec![];
        run("(\"hi\" ** 2)", &mut output, &mut errors).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "LEFT_PAREN ( null\nSTRING \"hi\" hi\nSTAR_STAR ** null\nRIGHT_PAREN ) null\nEOF  null\n"
        );
        assert_eq!(
            errors,
            vec![ScanningError::UnexpectedCharacter {
                line: 1,
                character: '2'
            }]
        );
    }
}
