//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use super::row::NetworkRow;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Human readable block per row, CIDR highlighted.
pub fn render_text(rows: &[NetworkRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "{index:>3}  {cidr}  [{class}]\n",
            index = row.index,
            cidr = row.cidr.green().bold(),
            class = row.class.cyan(),
        ));
        out.push_str(&format!(
            "     network {}  broadcast {}\n",
            row.network, row.broadcast
        ));
        out.push_str(&format!(
            "     hosts   {} - {}  size {}  netmask {}\n",
            row.first,
            row.last,
            row.size.yellow(),
            row.netmask
        ));
    }
    out
}

/// One CIDR per line, the compact form of a listing.
pub fn render_list(rows: &[NetworkRow]) -> String {
    rows.iter()
        .map(|row| format!("{}\n", row.cidr.green()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Network;
    use crate::output::row::rows_for;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_render_text() {
        let rows = rows_for(&[Network::parse("172.16.10.0/23").unwrap()]);
        let text = render_text(&rows);
        assert!(text.contains("172.16.10.0/23"));
        assert!(text.contains("172.16.11.255"));
        assert!(text.contains("255.255.254.0"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_render_list() {
        let rows = rows_for(&[
            Network::parse("10.0.0.0/25").unwrap(),
            Network::parse("10.0.0.128/25").unwrap(),
        ]);
        let text = render_list(&rows);
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().contains("10.0.0.128/25"));
    }
}
