//! IPv4-mapped IPv6 addresses (`::ffff:w.x.y.z`).

use super::cidr::Cidr;
use super::ipv6::parse_v6_suffix;
use super::prefix::{Prefix, V4_BITS, V6_BITS};
use super::{Ipv4, Ipv6};
use crate::codec::ipv4::parse_dotted;
use crate::codec::ipv6::expand_groups;
use crate::error::CidrError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Value of `::ffff:0:0`, the start of the mapped range.
pub const MAPPED_BASE: u128 = 0xFFFF_0000_0000;
/// Prefix bits in front of the embedded IPv4 address.
const MAPPED_PREFIX_BITS: u8 = 96;

static MAPPED_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_mapped_regex() -> &'static Regex {
    MAPPED_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^::(?:ffff:)?(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})$").expect("Invalid Regex")
    })
}

/// IPv6 value that embeds an IPv4 address in its low 32 bits.
///
/// The IPv4 view is kept as its own field; its prefix is the IPv6 prefix minus
/// the 96 mapping bits (zero when the IPv6 prefix is shorter than that).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv6Mapped {
    ipv6: Ipv6,
    ipv4: Ipv4,
}

impl Serialize for Ipv6Mapped {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv6Mapped {
    fn deserialize<D>(deserializer: D) -> Result<Ipv6Mapped, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv6Mapped::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv6Mapped {
    /// Parse `::ffff:w.x.y.z`, `::w.x.y.z` or the hex form `::ffff:a00:1`,
    /// each with an optional IPv6 `/len` (default 128).
    pub fn new(addr_cidr: &str) -> Result<Ipv6Mapped, CidrError> {
        let addr_cidr = addr_cidr.trim();
        let invalid = || CidrError::InvalidAddress(addr_cidr.to_string());
        let (addr_text, suffix) = match addr_cidr.split_once('/') {
            Some((addr, suffix)) => (addr, Some(suffix)),
            None => (addr_cidr, None),
        };

        let ipv4_value = if addr_text.contains('.') {
            let caps = get_mapped_regex().captures(addr_text).ok_or_else(invalid)?;
            parse_dotted(&caps[1]).ok_or_else(invalid)?
        } else {
            let groups = expand_groups(addr_text).map_err(|_| invalid())?;
            if groups[..5].iter().any(|g| *g != 0) || groups[5] != 0xFFFF {
                return Err(invalid());
            }
            (u32::from(groups[6]) << 16) | u32::from(groups[7])
        };

        let prefix = parse_v6_suffix(suffix, addr_cidr)?;
        Ok(Ipv6Mapped::from_parts(ipv4_value, prefix))
    }

    fn from_parts(ipv4_value: u32, prefix: Prefix) -> Ipv6Mapped {
        let v4_length = prefix.length().saturating_sub(MAPPED_PREFIX_BITS);
        Ipv6Mapped {
            ipv6: Ipv6::from_parts(MAPPED_BASE | u128::from(ipv4_value), prefix),
            ipv4: Ipv4::from_parts(u128::from(ipv4_value), Prefix::new_unchecked(v4_length, V4_BITS)),
        }
    }

    /// Map an IPv4 value; its prefix is widened by the 96 mapping bits.
    pub fn from_ipv4(ipv4: Ipv4) -> Ipv6Mapped {
        let length = MAPPED_PREFIX_BITS + ipv4.prefix().length();
        Ipv6Mapped {
            ipv6: Ipv6::from_parts(
                MAPPED_BASE | ipv4.value(),
                Prefix::new_unchecked(length, V6_BITS),
            ),
            ipv4,
        }
    }

    /// Recover the mapped form of an IPv6 value inside `::ffff:0:0/96`.
    pub fn from_ipv6(ipv6: Ipv6) -> Option<Ipv6Mapped> {
        if !ipv6.is_mapped() || ipv6.prefix().length() < MAPPED_PREFIX_BITS {
            return None;
        }
        Some(Ipv6Mapped::from_parts(ipv6.to_u128() as u32, ipv6.prefix()))
    }

    /// The embedded IPv4 address.
    pub fn ipv4(&self) -> Ipv4 {
        self.ipv4
    }

    /// The full IPv6 value.
    pub fn ipv6(&self) -> Ipv6 {
        self.ipv6
    }

    pub fn prefix(&self) -> Prefix {
        self.ipv6.prefix()
    }

    /// `::ffff:w.x.y.z` without the prefix.
    pub fn addr_string(&self) -> String {
        format!("::ffff:{}", self.ipv4.addr())
    }
}

impl FromStr for Ipv6Mapped {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Ipv6Mapped, CidrError> {
        Ipv6Mapped::new(s)
    }
}

impl fmt::Display for Ipv6Mapped {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr_string(), self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let mapped = Ipv6Mapped::new("::ffff:172.16.10.1").unwrap();
        assert_eq!(mapped.ipv6().to_u128(), 0xFFFF_AC10_0A01);
        assert_eq!(mapped.ipv4().addr_string(), "172.16.10.1");
        assert_eq!(mapped.ipv4().prefix().length(), 32);
        assert_eq!(mapped.prefix().length(), 128);
        assert_eq!(mapped.to_string(), "::ffff:172.16.10.1/128");
        assert_eq!(mapped.ipv6().compressed(), "::ffff:ac10:a01");
    }

    #[test]
    fn test_new_variants() {
        let compat = Ipv6Mapped::new("::172.16.10.1/120").unwrap();
        assert_eq!(compat.ipv6().to_u128(), 0xFFFF_AC10_0A01);
        assert_eq!(compat.ipv4().prefix().length(), 24);

        let hex = Ipv6Mapped::new("::FFFF:ac10:a01").unwrap();
        assert_eq!(hex.ipv4().addr_string(), "172.16.10.1");

        let short = Ipv6Mapped::new("::ffff:10.0.0.1/64").unwrap();
        assert_eq!(short.ipv4().prefix().length(), 0);
    }

    #[test]
    fn test_new_errors() {
        assert!(Ipv6Mapped::new("::ffff:10.0.0.256").is_err());
        assert!(Ipv6Mapped::new("1::ffff:10.0.0.1").is_err());
        assert!(Ipv6Mapped::new("::eeee:10.0.0.1").is_err());
        assert!(Ipv6Mapped::new("::1").is_err());
        assert!(Ipv6Mapped::new("::ffff:10.0.0.1/129").is_err());
    }

    #[test]
    fn test_from_ipv4() {
        let ipv4 = Ipv4::new("10.1.2.0/24").unwrap();
        let mapped = ipv4.to_mapped();
        assert_eq!(mapped.prefix().length(), 120);
        assert_eq!(mapped.to_string(), "::ffff:10.1.2.0/120");
        assert_eq!(mapped.ipv4(), ipv4);
        assert_eq!(Ipv6Mapped::from_ipv6(mapped.ipv6()), Some(mapped));
        assert_eq!(Ipv6Mapped::from_ipv6(Ipv6::loopback()), None);
    }
}
