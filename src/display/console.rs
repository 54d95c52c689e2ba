use super::{DisplayRegion, LoadingIndicator};
use std::io::Write;

/// Terminal-backed display region: results go to stdout, errors to stderr.
pub struct ConsoleRegion;

impl DisplayRegion for ConsoleRegion {
    fn clear(&self) {
        // Terminal history is append-only; there is nothing to erase.
    }

    fn show_message(&self, text: &str) {
        println!("{}", text);
    }

    fn show_error(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Status line on stderr, erased in place once the request settles.
pub struct ConsoleIndicator {
    message: String,
}

impl ConsoleIndicator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl LoadingIndicator for ConsoleIndicator {
    fn show(&self) {
        eprint!("{}...", self.message);
        let _ = std::io::stderr().flush();
    }

    fn hide(&self) {
        // Overwrite the status line with spaces, then return the cursor.
        eprint!("\r{:width$}\r", "", width = self.message.len() + 3);
        let _ = std::io::stderr().flush();
    }
}
