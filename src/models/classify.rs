//! Address classification against fixed, well-known ranges.
//!
//! Each family has a static ordered table of `(network, prefix, class)`
//! entries; the first entry whose network includes the value wins.

use super::cidr::Cidr;
use super::prefix::{Prefix, V4_BITS};
use super::{Ipv4, Ipv6};
use crate::error::CidrError;
use serde::Serialize;
use std::fmt;

/// Well-known range an address or network falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressClass {
    Unspecified,
    Loopback,
    Private,
    LinkLocal,
    UniqueLocal,
    Multicast,
    Mapped,
    Reserved,
    Global,
}

impl AddressClass {
    /// RFC 1918 ranges, plus IPv6 unique local addresses.
    pub fn is_private(&self) -> bool {
        matches!(self, AddressClass::Private | AddressClass::UniqueLocal)
    }

    pub fn is_loopback(&self) -> bool {
        *self == AddressClass::Loopback
    }

    pub fn is_multicast(&self) -> bool {
        *self == AddressClass::Multicast
    }

    pub fn is_link_local(&self) -> bool {
        *self == AddressClass::LinkLocal
    }

    pub fn is_unspecified(&self) -> bool {
        *self == AddressClass::Unspecified
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AddressClass::Unspecified => "unspecified",
            AddressClass::Loopback => "loopback",
            AddressClass::Private => "private",
            AddressClass::LinkLocal => "link-local",
            AddressClass::UniqueLocal => "unique-local",
            AddressClass::Multicast => "multicast",
            AddressClass::Mapped => "ipv4-mapped",
            AddressClass::Reserved => "reserved",
            AddressClass::Global => "global",
        };
        f.write_str(name)
    }
}

const V4_CLASSES: &[(u128, u8, AddressClass)] = &[
    (0x0000_0000, 32, AddressClass::Unspecified),
    (0x7F00_0000, 8, AddressClass::Loopback),
    (0x0A00_0000, 8, AddressClass::Private),
    (0xAC10_0000, 12, AddressClass::Private),
    (0xC0A8_0000, 16, AddressClass::Private),
    (0xA9FE_0000, 16, AddressClass::LinkLocal),
    (0xE000_0000, 4, AddressClass::Multicast),
    (0xF000_0000, 4, AddressClass::Reserved),
];

const V6_CLASSES: &[(u128, u8, AddressClass)] = &[
    (0, 128, AddressClass::Unspecified),
    (1, 128, AddressClass::Loopback),
    (0xFFFF_0000_0000, 96, AddressClass::Mapped),
    (0xFE80_u128 << 112, 10, AddressClass::LinkLocal),
    (0xFC00_u128 << 112, 7, AddressClass::UniqueLocal),
    (0xFF00_u128 << 112, 8, AddressClass::Multicast),
];

fn lookup<T: Cidr>(value: &T, table: &[(u128, u8, AddressClass)]) -> AddressClass {
    table
        .iter()
        .find(|(network, length, _)| {
            let range = T::from_parts(*network, Prefix::new_unchecked(*length, T::BITS));
            range.includes(value)
        })
        .map(|(_, _, class)| *class)
        .unwrap_or(AddressClass::Global)
}

impl Ipv4 {
    /// First matching well-known range, or [`AddressClass::Global`].
    pub fn classify(&self) -> AddressClass {
        lookup(self, V4_CLASSES)
    }

    pub fn is_private(&self) -> bool {
        self.classify().is_private()
    }

    pub fn is_loopback(&self) -> bool {
        self.classify().is_loopback()
    }

    pub fn is_multicast(&self) -> bool {
        self.classify().is_multicast()
    }

    pub fn is_link_local(&self) -> bool {
        self.classify().is_link_local()
    }

    /// Leading bit `0`.
    pub fn is_class_a(&self) -> bool {
        self.to_u32() >> 31 == 0b0
    }

    /// Leading bits `10`.
    pub fn is_class_b(&self) -> bool {
        self.to_u32() >> 30 == 0b10
    }

    /// Leading bits `110`.
    pub fn is_class_c(&self) -> bool {
        self.to_u32() >> 29 == 0b110
    }

    /// Prefix length implied by the pre-CIDR address class.
    pub fn classful_prefix(&self) -> Result<u8, CidrError> {
        if self.is_class_a() {
            Ok(8)
        } else if self.is_class_b() {
            Ok(16)
        } else if self.is_class_c() {
            Ok(24)
        } else {
            Err(CidrError::OutOfRange(format!(
                "{} has no classful prefix",
                self.addr()
            )))
        }
    }

    /// Parse a bare address and give it its classful prefix.
    pub fn parse_classful(text: &str) -> Result<Ipv4, CidrError> {
        let host = Ipv4::new(text)?;
        if host.prefix().length() != V4_BITS {
            return Err(CidrError::InvalidAddress(text.to_string()));
        }
        let length = host.classful_prefix()?;
        host.with_prefix(length)
    }
}

impl Ipv6 {
    /// First matching well-known range, or [`AddressClass::Global`].
    pub fn classify(&self) -> AddressClass {
        lookup(self, V6_CLASSES)
    }

    pub fn is_loopback(&self) -> bool {
        self.classify().is_loopback()
    }

    pub fn is_multicast(&self) -> bool {
        self.classify().is_multicast()
    }

    pub fn is_link_local(&self) -> bool {
        self.classify().is_link_local()
    }

    pub fn is_unique_local(&self) -> bool {
        self.classify() == AddressClass::UniqueLocal
    }
}
