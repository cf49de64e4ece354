//! Rendering of command results as tables or JSON.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Print rows, or a placeholder line when a table would be empty
    pub fn print_list<T: Serialize + Tabled>(self, rows: &[T]) {
        match self {
            Self::Table if rows.is_empty() => println!("No results found."),
            Self::Table => println!("{}", Table::new(rows)),
            Self::Json => println!("{}", to_json(rows)),
        }
    }

    /// Print one row
    pub fn print_item<T: Serialize + Tabled>(self, row: &T) {
        match self {
            Self::Table => println!("{}", Table::new([row])),
            Self::Json => println!("{}", to_json(row)),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}
