use std::io::{BufRead, Lines};

use crate::scanner::{tokenize, ScanningError};

/// Handling multi-line input in the REPL.
/// Collecting lines until we are ready to scan them: a string literal or a block comment can
/// span several lines, so an entry that stops inside one keeps reading.
/// An empty line always ends the entry, which is the way out of a stray `"` or `/*`.
pub struct MultilineInput<T: BufRead> {
    lines: Lines<T>,
}

impl<T: BufRead> MultilineInput<T> {
    pub fn new(lines: Lines<T>) -> MultilineInput<T> {
        MultilineInput { lines }
    }
}

impl<T: BufRead> Iterator for MultilineInput<T> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut current_input = String::new();
        loop {
            let line = match self.lines.next() {
                // stdin closed: hand over whatever is pending so CTRL+D still runs it, like python.
                None if current_input.is_empty() => return None,
                None => return Some(Ok(current_input)),
                Some(Err(err)) => return Some(Err(err)),
                Some(Ok(line)) => line,
            };

            if line.is_empty() {
                if current_input.is_empty() {
                    continue;
                }
                return Some(Ok(current_input));
            }

            if !current_input.is_empty() {
                current_input.push('\n');
            }
            current_input += &line;

            if !ends_inside_literal_or_comment(&current_input) {
                return Some(Ok(current_input));
            }
        }
    }
}

/// Let the scanner decide: only an unterminated string or block comment means "keep reading".
fn ends_inside_literal_or_comment(source: &str) -> bool {
    let mut errors: Vec<ScanningError> = vec![];
    tokenize(source, &mut errors);
    errors.iter().any(|err| {
        matches!(
            err,
            ScanningError::UnterminatedString { .. } | ScanningError::UnterminatedBlockComment { .. }
        )
    })
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Cursor};

    use crate::repl::MultilineInput;

    fn entries(input: &str) -> Vec<String> {
        MultilineInput::new(Cursor::new(input.to_string()).lines())
            .map(|entry| entry.unwrap())
            .collect()
    }

    #[test]
    fn test_one_entry_per_line() {
        assert_eq!(entries("(+)\n!=\n"), vec!["(+)", "!="]);
    }

    #[test]
    fn test_string_spanning_lines() {
        assert_eq!(
            entries("= \"first\nsecond\" ;\n+\n"),
            vec!["= \"first\nsecond\" ;", "+"]
        );
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        assert_eq!(entries("/* a\nb\n*/ -\n"), vec!["/* a\nb\n*/ -"]);
    }

    #[test]
    fn test_empty_line_ends_open_entry() {
        assert_eq!(entries("\"never closed\n\n+\n"), vec!["\"never closed", "+"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(entries("\n\n;\n"), vec![";"]);
    }

    #[test]
    fn test_pending_input_returned_at_end_of_stream() {
        assert_eq!(entries("\"still open"), vec!["\"still open"]);
    }

    #[test]
    fn test_unexpected_characters_do_not_hold_the_entry() {
        assert_eq!(entries("@#\n"), vec!["@#"]);
    }
}
