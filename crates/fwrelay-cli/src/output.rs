//! Output formatting for fwrelay-cli (table, json, chat)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII tables (default)
    #[default]
    Table,
    /// The lookup result as JSON, as the HTTP relay returns it
    Json,
    /// The MarkdownV2 messages the chat front end would send
    Chat,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", msg.yellow());
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print a titled table of field/value pairs
    pub fn print_section(&self, title: &str, rows: &[FieldRow]) {
        if !self.quiet {
            println!("{}", title.bold());
        }
        println!("{}", Table::new(rows));
    }

    /// Print any serializable value as pretty JSON
    pub fn print_json<T: Serialize>(&self, data: &T) {
        println!(
            "{}",
            serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
        );
    }

    /// Print chat messages separated by blank lines
    pub fn print_messages(&self, messages: &[String]) {
        for message in messages {
            println!("{}\n", message);
        }
    }
}

/// One row of a section table
#[derive(Debug, Clone, PartialEq, Tabled, Serialize)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    /// Row for an optional value, shown as `-` when absent or empty
    pub fn new(field: &str, value: Option<&str>) -> Self {
        Self {
            field: field.to_string(),
            value: value
                .filter(|v| !v.is_empty())
                .unwrap_or("-")
                .to_string(),
        }
    }
}
