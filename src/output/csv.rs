//! CSV output formatting for network rows.

use super::row::NetworkRow;
use super::terminal::format_field;
use crate::config;

/// Column names, quoted and padded like the data rows.
fn csv_header() -> String {
    [
        format_field("cnt", config::WIDTH_INDEX),
        format_field("cidr", config::WIDTH_CIDR),
        format_field("network", config::WIDTH_ADDR),
        format_field("broadcast", config::WIDTH_ADDR),
        format_field("first", config::WIDTH_ADDR),
        format_field("last", config::WIDTH_ADDR),
        format_field("size", config::WIDTH_SIZE),
        format_field("netmask", config::WIDTH_NETMASK),
        format_field("class", config::WIDTH_CLASS),
    ]
    .join(",")
}

/// Render a single CSV row.
fn csv_row(row: &NetworkRow) -> String {
    format!(
        "{index},{cidr},{network},{broadcast},{first},{last},{size},{netmask},{class}",
        index = format_field(row.index, config::WIDTH_INDEX),
        cidr = format_field(&row.cidr, config::WIDTH_CIDR),
        network = format_field(&row.network, config::WIDTH_ADDR),
        broadcast = format_field(&row.broadcast, config::WIDTH_ADDR),
        first = format_field(&row.first, config::WIDTH_ADDR),
        last = format_field(&row.last, config::WIDTH_ADDR),
        size = format_field(&row.size, config::WIDTH_SIZE),
        netmask = format_field(&row.netmask, config::WIDTH_NETMASK),
        class = format_field(&row.class, config::WIDTH_CLASS),
    )
}

/// Header plus one line per row.
pub fn render_csv(rows: &[NetworkRow]) -> String {
    log::debug!("render {} csv row(s)", rows.len());
    let mut out = csv_header();
    out.push('\n');
    for row in rows {
        out.push_str(&csv_row(row));
        out.push('\n');
    }
    out
}
