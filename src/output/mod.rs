//! Output formatting for network listings.
//!
//! This module handles formatting of network data:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal output with colors
//! - JSON through `serde_json`

mod csv;
mod row;
mod terminal;

use crate::models::Network;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

pub use csv::render_csv;
pub use row::{rows_for, NetworkRow};
pub use terminal::{format_field, render_list, render_text};

/// Selected output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<OutputFormat, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format '{other}', use text, csv or json")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Full detail per network, for `info`.
pub fn render_details(networks: &[Network], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let rows = rows_for(networks);
    match format {
        OutputFormat::Text => Ok(render_text(&rows)),
        OutputFormat::Csv => Ok(render_csv(&rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)? + "\n"),
    }
}

/// Result of a set operation: CIDRs only in text and JSON, full rows in CSV.
pub fn render_networks(networks: &[Network], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    match format {
        OutputFormat::Text => Ok(render_list(&rows_for(networks))),
        OutputFormat::Csv => Ok(render_csv(&rows_for(networks))),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(networks)? + "\n"),
    }
}
