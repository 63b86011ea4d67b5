//! IPv4 address with CIDR prefix.
//!
//! Provides the [`Ipv4`] struct: a 32-bit address value plus its own
//! [`Prefix`]. The same type stands for a host address and for a network; it is
//! a network when the host bits are all zero.

use super::cidr::Cidr;
use super::prefix::{Prefix, V4_BITS};
use super::Ipv6Mapped;
use crate::codec::ipv4::{format_dotted, parse_dotted};
use crate::codec::parse_prefix_length;
use crate::error::CidrError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Number of octets in an IPv4 address.
pub const OCTETS: usize = 4;

/// IPv4 address with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    addr: u32,
    prefix: Prefix,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Parse `w.x.y.z`, `w.x.y.z/len` or `w.x.y.z/netmask`.
    ///
    /// Without a suffix the result is a host route (`/32`).
    ///
    /// # Examples
    /// ```
    /// use cidr_algebra::models::Ipv4;
    /// let ip = Ipv4::new("172.16.10.1/255.255.255.0").unwrap();
    /// assert_eq!(ip.to_string(), "172.16.10.1/24");
    /// ```
    pub fn new(addr_cidr: &str) -> Result<Ipv4, CidrError> {
        let addr_cidr = addr_cidr.trim();
        let (addr_text, suffix) = match addr_cidr.split_once('/') {
            Some((addr, suffix)) => (addr, Some(suffix)),
            None => (addr_cidr, None),
        };
        let addr =
            parse_dotted(addr_text).ok_or_else(|| CidrError::InvalidAddress(addr_cidr.to_string()))?;
        let prefix = match suffix {
            None => Prefix::v4(V4_BITS)?,
            Some(suffix) => match parse_prefix_length(suffix) {
                Some(length) => Prefix::from_length(length, V4_BITS)?,
                None => Prefix::from_netmask(suffix)
                    .map_err(|_| CidrError::InvalidNetmask(addr_cidr.to_string()))?,
            },
        };
        Ok(Ipv4 { addr, prefix })
    }

    /// Build from the 32-bit address value.
    pub fn from_u32(addr: u32, length: u8) -> Result<Ipv4, CidrError> {
        Ok(Ipv4 {
            addr,
            prefix: Prefix::v4(length)?,
        })
    }

    /// Build from four big-endian bytes, the inverse of [`Ipv4::to_bytes`].
    pub fn from_bytes(buf: &[u8], length: u8) -> Result<Ipv4, CidrError> {
        let octets: [u8; OCTETS] = buf
            .try_into()
            .map_err(|_| CidrError::InvalidAddress(format!("{buf:02x?}")))?;
        Ipv4::from_u32(u32::from_be_bytes(octets), length)
    }

    pub fn to_u32(&self) -> u32 {
        self.addr
    }

    pub fn to_bytes(&self) -> [u8; OCTETS] {
        self.addr.to_be_bytes()
    }

    /// The address without its prefix as a std value.
    pub fn addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.addr)
    }

    /// Dotted-decimal address without the prefix.
    pub fn addr_string(&self) -> String {
        format_dotted(self.addr)
    }

    pub fn octets(&self) -> [u8; OCTETS] {
        self.to_bytes()
    }

    pub fn octet(&self, index: usize) -> Result<u8, CidrError> {
        self.octets()
            .get(index)
            .copied()
            .ok_or(CidrError::IndexOutOfRange {
                index,
                len: OCTETS,
            })
    }

    /// Copy of this address with one octet replaced.
    pub fn with_octet(&self, index: usize, value: u8) -> Result<Ipv4, CidrError> {
        let mut octets = self.octets();
        let slot = octets.get_mut(index).ok_or(CidrError::IndexOutOfRange {
            index,
            len: OCTETS,
        })?;
        *slot = value;
        Ok(Ipv4 {
            addr: u32::from_be_bytes(octets),
            prefix: self.prefix,
        })
    }

    /// Dotted-decimal netmask of the prefix.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask() as u32)
    }

    /// Address as 32 binary digits.
    pub fn to_bits(&self) -> String {
        format!("{:032b}", self.addr)
    }

    /// Reverse-DNS name, `d.c.b.a.in-addr.arpa`.
    pub fn reverse(&self) -> String {
        let [a, b, c, d] = self.octets();
        format!("{d}.{c}.{b}.{a}.in-addr.arpa")
    }

    /// IPv4-mapped IPv6 form `::ffff:w.x.y.z`, prefix widened by 96 bits.
    pub fn to_mapped(&self) -> Ipv6Mapped {
        Ipv6Mapped::from_ipv4(*self)
    }
}

impl Cidr for Ipv4 {
    const BITS: u8 = V4_BITS;

    fn value(&self) -> u128 {
        u128::from(self.addr)
    }

    fn prefix(&self) -> Prefix {
        self.prefix
    }

    fn from_parts(value: u128, prefix: Prefix) -> Ipv4 {
        debug_assert_eq!(prefix.bits(), V4_BITS);
        Ipv4 {
            addr: value as u32,
            prefix,
        }
    }
}

impl FromStr for Ipv4 {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Ipv4, CidrError> {
        Ipv4::new(s)
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr(), self.prefix)
    }
}

/// Probe-style check of an IPv4 literal, with or without a suffix.
pub fn valid_ipv4(text: &str) -> bool {
    Ipv4::new(text).is_ok()
}

/// Probe-style check of a dotted netmask.
pub fn valid_ipv4_netmask(text: &str) -> bool {
    Prefix::from_netmask(text).is_ok()
}
