//! Terminal output utilities.
//!
//! Status messages go to stderr so stdout carries only the rendered fragment.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            red: Style::new().red(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Write a rendered HTML fragment to stdout, newline-terminated.
    pub(crate) fn fragment(&self, html: &str) -> std::io::Result<()> {
        if html.ends_with('\n') {
            self.stdout.write_str(html)
        } else {
            self.stdout.write_line(html)
        }
    }
}
