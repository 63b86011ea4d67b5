//! IPv6 address with CIDR prefix.

use super::cidr::Cidr;
use super::prefix::{Prefix, V6_BITS};
use super::Ipv6Mapped;
use crate::codec::ipv6::{
    compress_groups, expand_from_groups, expand_groups, groups_to_u128, u128_to_groups, GROUPS,
};
use crate::codec::parse_prefix_length;
use crate::error::CidrError;
use itertools::Itertools;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

/// IPv6 address with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv6 {
    addr: u128,
    prefix: Prefix,
}

impl Serialize for Ipv6 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv6 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv6, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv6::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv6 {
    /// Parse a compressed or full IPv6 literal with an optional `/len`.
    ///
    /// A dotted IPv4 tail is only accepted in the mapped grammar
    /// (`::ffff:w.x.y.z` or `::w.x.y.z`). Without a suffix the result is `/128`.
    ///
    /// # Examples
    /// ```
    /// use cidr_algebra::models::Ipv6;
    /// let ip = Ipv6::new("2001:0db8:0000:0000:0008:0800:200c:417a/64").unwrap();
    /// assert_eq!(ip.to_string(), "2001:db8::8:800:200c:417a/64");
    /// ```
    pub fn new(addr_cidr: &str) -> Result<Ipv6, CidrError> {
        let addr_cidr = addr_cidr.trim();
        if addr_cidr.contains('.') {
            return Ipv6Mapped::new(addr_cidr).map(|mapped| mapped.ipv6());
        }
        let (addr_text, suffix) = match addr_cidr.split_once('/') {
            Some((addr, suffix)) => (addr, Some(suffix)),
            None => (addr_cidr, None),
        };
        let groups = expand_groups(addr_text)
            .map_err(|_| CidrError::InvalidAddress(addr_cidr.to_string()))?;
        Ok(Ipv6 {
            addr: groups_to_u128(&groups),
            prefix: parse_v6_suffix(suffix, addr_cidr)?,
        })
    }

    /// Build from the 128-bit address value.
    pub fn from_u128(addr: u128, length: u8) -> Result<Ipv6, CidrError> {
        Ok(Ipv6 {
            addr,
            prefix: Prefix::v6(length)?,
        })
    }

    /// Build from sixteen big-endian bytes, the inverse of [`Ipv6::to_bytes`].
    pub fn from_bytes(buf: &[u8], length: u8) -> Result<Ipv6, CidrError> {
        let bytes: [u8; 16] = buf
            .try_into()
            .map_err(|_| CidrError::InvalidAddress(format!("{buf:02x?}")))?;
        Ipv6::from_u128(u128::from_be_bytes(bytes), length)
    }

    /// `::1/128`
    pub fn loopback() -> Ipv6 {
        Ipv6 {
            addr: 1,
            prefix: Prefix::host_route(V6_BITS),
        }
    }

    /// `::/128`
    pub fn unspecified() -> Ipv6 {
        Ipv6 {
            addr: 0,
            prefix: Prefix::host_route(V6_BITS),
        }
    }

    pub fn to_u128(&self) -> u128 {
        self.addr
    }

    pub fn to_bytes(&self) -> [u8; 16] {
        self.addr.to_be_bytes()
    }

    /// The address without its prefix as a std value.
    pub fn addr(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.addr)
    }

    pub fn groups(&self) -> [u16; GROUPS] {
        u128_to_groups(self.addr)
    }

    pub fn group(&self, index: usize) -> Result<u16, CidrError> {
        self.groups()
            .get(index)
            .copied()
            .ok_or(CidrError::IndexOutOfRange {
                index,
                len: GROUPS,
            })
    }

    /// Copy of this address with one 16-bit group replaced.
    pub fn with_group(&self, index: usize, value: u16) -> Result<Ipv6, CidrError> {
        let mut groups = self.groups();
        let slot = groups.get_mut(index).ok_or(CidrError::IndexOutOfRange {
            index,
            len: GROUPS,
        })?;
        *slot = value;
        Ok(Ipv6 {
            addr: groups_to_u128(&groups),
            prefix: self.prefix,
        })
    }

    /// Canonical compressed address text, without the prefix.
    pub fn compressed(&self) -> String {
        compress_groups(&self.groups())
    }

    /// Eight zero-padded groups, without the prefix.
    pub fn expanded(&self) -> String {
        expand_from_groups(&self.groups())
    }

    /// Address as 32 hex digits.
    pub fn hex_string(&self) -> String {
        format!("{:032x}", self.addr)
    }

    /// Address as 128 binary digits.
    pub fn to_bits(&self) -> String {
        format!("{:0128b}", self.addr)
    }

    /// Reverse-DNS name, one label per nibble under `ip6.arpa`.
    pub fn reverse(&self) -> String {
        let nibbles = self.hex_string().chars().rev().join(".");
        format!("{nibbles}.ip6.arpa")
    }

    /// UNC literal form, e.g. `2001-db8--1.ipv6-literal.net`.
    pub fn literal(&self) -> String {
        format!("{}.ipv6-literal.net", self.compressed().replace(':', "-"))
    }

    /// True for addresses inside `::ffff:0:0/96`.
    pub fn is_mapped(&self) -> bool {
        self.addr >> 32 == 0xFFFF
    }
}

pub(crate) fn parse_v6_suffix(suffix: Option<&str>, text: &str) -> Result<Prefix, CidrError> {
    match suffix {
        None => Prefix::v6(V6_BITS),
        Some(suffix) => match parse_prefix_length(suffix) {
            Some(length) => Prefix::from_length(length, V6_BITS),
            None => Err(CidrError::InvalidNetmask(text.to_string())),
        },
    }
}

impl Cidr for Ipv6 {
    const BITS: u8 = V6_BITS;

    fn value(&self) -> u128 {
        self.addr
    }

    fn prefix(&self) -> Prefix {
        self.prefix
    }

    fn from_parts(value: u128, prefix: Prefix) -> Ipv6 {
        debug_assert_eq!(prefix.bits(), V6_BITS);
        Ipv6 {
            addr: value,
            prefix,
        }
    }
}

impl FromStr for Ipv6 {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Ipv6, CidrError> {
        Ipv6::new(s)
    }
}

impl fmt::Display for Ipv6 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.compressed(), self.prefix)
    }
}

/// Probe-style check of an IPv6 literal, mapped grammar included.
pub fn valid_ipv6(text: &str) -> bool {
    Ipv6::new(text).is_ok()
}
