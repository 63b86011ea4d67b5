//! Dotted-decimal IPv4 text.

use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

static DOTTED_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_regex() -> &'static Regex {
    DOTTED_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$").expect("Invalid Regex")
    })
}

/// Parse `w.x.y.z` into its 32-bit value.
///
/// Each group is one to three decimal digits in `0..=255`. Returns `None` for
/// anything else, including surrounding whitespace.
pub fn parse_dotted(text: &str) -> Option<u32> {
    let caps = get_dotted_regex().captures(text)?;
    let mut value: u32 = 0;
    for i in 1..=4 {
        let octet: u16 = caps[i].parse().ok()?;
        if octet > 255 {
            return None;
        }
        value = (value << 8) | u32::from(octet);
    }
    Some(value)
}

/// Format a 32-bit value as `w.x.y.z`.
pub fn format_dotted(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        assert_eq!(parse_dotted("10.0.0.1"), Some(0x0A00_0001));
        assert_eq!(parse_dotted("255.255.255.255"), Some(u32::MAX));
        assert_eq!(parse_dotted("0.0.0.0"), Some(0));
        assert_eq!(parse_dotted("010.001.000.001"), Some(0x0A01_0001));
    }

    #[test]
    fn test_parse_dotted_invalid() {
        assert_eq!(parse_dotted("10.0.0.256"), None);
        assert_eq!(parse_dotted("10.0.0"), None);
        assert_eq!(parse_dotted("10.0.0.0.1"), None);
        assert_eq!(parse_dotted("10.0.0.1000"), None);
        assert_eq!(parse_dotted(" 10.0.0.1"), None);
        assert_eq!(parse_dotted("a.b.c.d"), None);
        assert_eq!(parse_dotted(""), None);
        assert_eq!(parse_dotted("10.0.0.١"), None);
    }

    #[test]
    fn test_format_dotted() {
        assert_eq!(format_dotted(0xC0A8_0101), "192.168.1.1");
        assert_eq!(format_dotted(0), "0.0.0.0");
    }
}
