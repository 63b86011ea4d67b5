//! Text codecs for address literals.
//!
//! - [`ipv4`] - dotted-decimal quads, also used for netmasks
//! - [`ipv6`] - group expansion and canonical `::` compression

pub mod ipv4;
pub mod ipv6;

pub use ipv6::{compress, expand};

use regex::Regex;
use std::sync::OnceLock;

static LENGTH_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_length_regex() -> &'static Regex {
    LENGTH_REGEX.get_or_init(|| Regex::new(r"^[0-9]{1,3}$").expect("Invalid Regex"))
}

/// Read a `/suffix` as a CIDR prefix length when it is one to three digits.
///
/// Anything else (for IPv4, typically a dotted netmask) yields `None`.
pub fn parse_prefix_length(suffix: &str) -> Option<i32> {
    if get_length_regex().is_match(suffix) {
        suffix.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix_length() {
        assert_eq!(parse_prefix_length("24"), Some(24));
        assert_eq!(parse_prefix_length("0"), Some(0));
        assert_eq!(parse_prefix_length("999"), Some(999));
        assert_eq!(parse_prefix_length("1000"), None);
        assert_eq!(parse_prefix_length("255.0.0.0"), None);
        assert_eq!(parse_prefix_length(""), None);
        assert_eq!(parse_prefix_length("+8"), None);
        assert_eq!(parse_prefix_length("٢٤"), None);
    }
}
