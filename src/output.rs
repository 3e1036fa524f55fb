//! Terminal output for the cabinetry CLI.
//!
//! Cargo-style status lines with a right-aligned coloured verb column.
//! Status output goes to stderr; stdout is kept for `--json` and other
//! machine-readable output.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::ValidationStatus;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits ANSI codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "    Checking galaga"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Print `subject` with the status label as the verb, coloured by
    /// severity. Messages and suggested files follow the subject.
    pub fn validation(&self, status: &ValidationStatus, subject: &str) {
        let line = status_line(status, subject);
        match status {
            ValidationStatus::Valid => self.success("Ok", &line),
            ValidationStatus::Warning { .. } => self.warning("Warning", &line),
            ValidationStatus::Error { .. } => self.error("Error", &line),
            ValidationStatus::Suggestion { .. } => self.info("Suggest", &line),
        }
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Cyan, for paths and file names.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Message text for a status line about `subject`.
///
/// `status_line(&ValidationStatus::error("Art file not found: x.png"), "bezel")`
/// gives "bezel: Art file not found: x.png".
pub fn status_line(status: &ValidationStatus, subject: &str) -> String {
    match status {
        ValidationStatus::Valid => subject.to_string(),
        ValidationStatus::Warning { message } | ValidationStatus::Error { message } => {
            format!("{}: {}", subject, message)
        }
        ValidationStatus::Suggestion {
            filename,
            confidence,
        } => format!(
            "{} -> {} ({:.0}%)",
            subject,
            filename,
            confidence * 100.0
        ),
    }
}

/// Pluralize a count: `plural(1, "error", "errors")` gives "1 error".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
