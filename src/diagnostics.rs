use std::io::{Stderr, Write};

use tracing::warn;

use crate::scanner::{ErrorReporter, ScanningError};

/// Default sink for lexical errors: one `[line N] Error: message` line each.
/// Remembers whether anything was reported so the driver can pick an exit code.
pub struct Diagnostics<W: Write> {
    writer: W,
    had_error: bool,
}

impl Diagnostics<Stderr> {
    pub fn stderr() -> Diagnostics<Stderr> {
        Diagnostics::new(std::io::stderr())
    }
}

impl<W: Write> Diagnostics<W> {
    pub fn new(writer: W) -> Diagnostics<W> {
        Diagnostics {
            writer,
            had_error: false,
        }
    }

    pub fn report_at(&mut self, line: usize, location: &str, message: &str) {
        self.had_error = true;
        if let Err(err) = writeln!(self.writer, "[line {line}] Error{location}: {message}") {
            warn!("could not write diagnostic: {err}");
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// The REPL keeps going after a bad entry.
    pub fn reset(&mut self) {
        self.had_error = false;
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ErrorReporter for Diagnostics<W> {
    fn report(&mut self, error: ScanningError) {
        self.report_at(error.line(), "", &error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::Diagnostics;
    use crate::scanner::tokenize;

    #[test]
    fn test_reports_are_formatted_with_line() {
        let mut diagnostics = Diagnostics::new(Vec::new());
        tokenize("+\n@\n\"open", &mut diagnostics);
        assert!(diagnostics.had_error());
        let output = String::from_utf8(diagnostics.into_inner()).unwrap();
        assert_eq!(
            output,
            "[line 2] Error: Unexpected Character.\n[line 3] Error: Unterminated string.\n"
        );
    }

    #[test]
    fn test_clean_source_has_no_error() {
        let mut diagnostics = Diagnostics::new(Vec::new());
        tokenize("(!= <= >=)", &mut diagnostics);
        assert!(!diagnostics.had_error());
        assert!(diagnostics.into_inner().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut diagnostics = Diagnostics::new(Vec::new());
        diagnostics.report_at(4, " at end", "something broke");
        assert!(diagnostics.had_error());
        diagnostics.reset();
        assert!(!diagnostics.had_error());
        let output = String::from_utf8(diagnostics.into_inner()).unwrap();
        assert_eq!(output, "[line 4] Error at end: something broke\n");
    }
}
