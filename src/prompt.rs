//! Blocking prompt helpers for programs built on the agent.

use std::io::{self, BufRead, Write};

use atoi::atoi;

/// Prompts over an arbitrary reader/writer pair.
///
/// Programs normally use the [`input_int`]/[`input_float`]/[`input_string`]
/// free functions, which wire this up to stdin and stdout.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Asks for an integer, re-asking until one is supplied.
    ///
    /// Like the usual `atoi` semantics, trailing junk after the digits is
    /// ignored: `42abc` reads as 42.
    pub fn int(&mut self, message: &str) -> io::Result<i64> {
        loop {
            let line = self.ask(message)?;
            let digits = line.trim().as_bytes();

            let value = match digits.split_first() {
                Some((b'-', rest)) => atoi::<i64>(rest).map(|v| -v),
                _ => atoi::<i64>(digits),
            };

            if let Some(value) = value {
                return Ok(value);
            }
        }
    }

    /// Asks for a float, re-asking until one is supplied.
    pub fn float(&mut self, message: &str) -> io::Result<f64> {
        loop {
            let line = self.ask(message)?;
            if let Ok(value) = line.trim().parse() {
                return Ok(value);
            }
        }
    }

    /// Asks for a line of text, with the trailing newline removed.
    pub fn string(&mut self, message: &str) -> io::Result<String> {
        let line = self.ask(message)?;
        Ok(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string())
    }

    fn ask(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }

        Ok(line)
    }
}

/// Blocks on stdin for an integer.
pub fn input_int(message: &str) -> io::Result<i64> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Prompter::new(stdin.lock(), stdout.lock()).int(message)
}

/// Blocks on stdin for a float.
pub fn input_float(message: &str) -> io::Result<f64> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Prompter::new(stdin.lock(), stdout.lock()).float(message)
}

/// Blocks on stdin for a line of text.
pub fn input_string(message: &str) -> io::Result<String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Prompter::new(stdin.lock(), stdout.lock()).string(message)
}

/// Runs a closure a fixed number of times.
pub fn repeat(count: usize, mut body: impl FnMut()) {
    for _ in 0..count {
        body();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{repeat, Prompter};

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn int() {
        assert_eq!(prompter("42\n").int("How many?").unwrap(), 42);
        assert_eq!(prompter("-7\n").int("How many?").unwrap(), -7);
    }

    #[test]
    fn int_ignores_trailing_junk() {
        assert_eq!(prompter("42abc\n").int("How many?").unwrap(), 42);
    }

    #[test]
    fn int_reasks_until_parseable() {
        let mut prompter = prompter("pony\n\n12\n");
        assert_eq!(prompter.int("How many?").unwrap(), 12);

        let output = String::from_utf8(prompter.output).unwrap();
        assert_eq!(output.matches("How many?").count(), 3);
    }

    #[test]
    fn float() {
        assert_eq!(prompter("2.5\n").float("How far?").unwrap(), 2.5);
        assert_eq!(prompter("x\n-0.5\n").float("How far?").unwrap(), -0.5);
    }

    #[test]
    fn string_strips_the_newline() {
        assert_eq!(prompter("Alice\n").string("Name?").unwrap(), "Alice");
        assert_eq!(prompter("Bob\r\n").string("Name?").unwrap(), "Bob");
    }

    #[test]
    fn exhausted_input_is_an_error() {
        let err = prompter("nope\n").int("How many?").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn repeat_runs_the_closure() {
        let mut count = 0;
        repeat(4, || count += 1);
        assert_eq!(count, 4);
    }
}
