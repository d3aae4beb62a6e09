//! Console output formatting for the CLI.

use colored::*;
use mailgist_domain::Reporter;

/// Console message formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Routes pipeline notices to the console.
pub struct ConsoleReporter<'a> {
    formatter: &'a Formatter,
}

impl<'a> ConsoleReporter<'a> {
    /// Wrap a formatter as a pipeline reporter.
    pub fn new(formatter: &'a Formatter) -> Self {
        Self { formatter }
    }
}

impl Reporter for ConsoleReporter<'_> {
    fn warn(&self, message: &str) {
        println!("{}", self.formatter.warning(message));
    }

    fn info(&self, message: &str) {
        println!("{}", self.formatter.info(message));
    }
}
