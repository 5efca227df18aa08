//! Error reporting.

use std::fmt;
use std::io::{self, IsTerminal, Write};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Severity {
    Bug,
    Error,
    Warning,
}

/// A diagnostic message, built incrementally and emitted through a
/// [`Reporter`].
#[derive(Clone)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    notes: Vec<String>,
}

impl Diagnostic {
    pub fn bug() -> Diagnostic {
        Self::new(Severity::Bug)
    }

    pub fn error() -> Diagnostic {
        Self::new(Severity::Error)
    }

    pub fn warning() -> Diagnostic {
        Self::new(Severity::Warning)
    }

    fn new(severity: Severity) -> Diagnostic {
        Diagnostic {
            severity,
            message: String::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_message<M: Into<String>>(mut self, message: M) -> Diagnostic {
        self.message = message.into();
        self
    }

    pub fn with_note<N: Into<String>>(mut self, note: N) -> Diagnostic {
        self.notes.push(note.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let severity = match self.severity {
            Severity::Bug => "bug",
            Severity::Error => "error",
            Severity::Warning => "warning",
        };

        write!(f, "{}: {}", severity, self.message)?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<io::Error> for Diagnostic {
    fn from(err: io::Error) -> Self {
        Diagnostic::error().with_message(err.to_string())
    }
}

/// Sink for diagnostics, writing to stderr.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new() -> Reporter {
        Reporter {
            color: io::stderr().is_terminal(),
        }
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        let mut stderr = io::stderr().lock();

        let _ = if self.color {
            let code = match diagnostic.severity {
                Severity::Bug | Severity::Error => "\x1b[31m",
                Severity::Warning => "\x1b[33m",
            };

            writeln!(stderr, "{}{}\x1b[0m", code, diagnostic)
        } else {
            writeln!(stderr, "{}", diagnostic)
        };
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Reporter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_notes() {
        let diagnostic = Diagnostic::error()
            .with_message("invalid attribute")
            .with_note("bit width must be at least 1");

        assert_eq!(
            diagnostic.to_string(),
            "error: invalid attribute\n  note: bit width must be at least 1"
        );
    }
}
