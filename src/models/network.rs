//! Family-polymorphic network value.
//!
//! [`Network`] is the closed set of address kinds the crate understands. It
//! dispatches parsing by the shape of the text and refuses binary operations
//! across families with [`CidrError::FamilyMismatch`].

use super::cidr::Cidr;
use super::classify::AddressClass;
use super::{AddressCount, Ipv4, Ipv6, Ipv6Mapped, Prefix};
use crate::error::CidrError;
use crate::processing;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Address family of a [`Network`]. Mapped addresses are IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    V4,
    V6,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::V4 => f.write_str("IPv4"),
            Family::V6 => f.write_str("IPv6"),
        }
    }
}

/// An IPv4, IPv6 or IPv4-mapped IPv6 address with its prefix.
///
/// Equality, hashing and ordering look at `(family, address value, prefix
/// length)`, so a mapped value equals the plain IPv6 value it encodes.
#[derive(Debug, Clone, Copy)]
pub enum Network {
    V4(Ipv4),
    V6(Ipv6),
    V6Mapped(Ipv6Mapped),
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::parse(&s).map_err(de::Error::custom)
    }
}

impl Network {
    /// Parse any supported literal, picking the family from its shape.
    ///
    /// # Examples
    /// ```
    /// use cidr_algebra::models::{Family, Network};
    /// assert_eq!(Network::parse("10.0.0.0/8").unwrap().family(), Family::V4);
    /// assert_eq!(Network::parse("2001:db8::/32").unwrap().family(), Family::V6);
    /// assert!(matches!(
    ///     Network::parse("::ffff:10.0.0.1").unwrap(),
    ///     Network::V6Mapped(_)
    /// ));
    /// ```
    pub fn parse(text: &str) -> Result<Network, CidrError> {
        let text = text.trim();
        let addr = text.split('/').next().unwrap_or(text);
        if addr.contains(':') && addr.contains('.') {
            Ipv6Mapped::new(text).map(Network::V6Mapped)
        } else if addr.contains(':') {
            Ipv6::new(text).map(Network::V6)
        } else {
            Ipv4::new(text).map(Network::V4)
        }
    }

    /// Decode 4 (IPv4) or 16 (IPv6) big-endian bytes.
    pub fn from_bytes(buf: &[u8], length: u8) -> Result<Network, CidrError> {
        match buf.len() {
            4 => Ipv4::from_bytes(buf, length).map(Network::V4),
            16 => Ipv6::from_bytes(buf, length).map(Network::V6),
            _ => Err(CidrError::InvalidAddress(format!("{buf:02x?}"))),
        }
    }

    /// Wrap an IPv6 value, keeping the mapped form when it is one.
    fn from_ipv6_view(ipv6: Ipv6, mapped: bool) -> Network {
        if mapped {
            if let Some(m) = Ipv6Mapped::from_ipv6(ipv6) {
                return Network::V6Mapped(m);
            }
        }
        Network::V6(ipv6)
    }

    fn is_mapped(&self) -> bool {
        matches!(self, Network::V6Mapped(_))
    }

    fn ipv6_view(&self) -> Option<Ipv6> {
        match self {
            Network::V4(_) => None,
            Network::V6(ip) => Some(*ip),
            Network::V6Mapped(m) => Some(m.ipv6()),
        }
    }

    /// Apply a same-family transformation to whichever value is inside.
    fn lift<F4, F6>(&self, on_v4: F4, on_v6: F6) -> Result<Network, CidrError>
    where
        F4: FnOnce(&Ipv4) -> Result<Ipv4, CidrError>,
        F6: FnOnce(&Ipv6) -> Result<Ipv6, CidrError>,
    {
        match self {
            Network::V4(ip) => on_v4(ip).map(Network::V4),
            Network::V6(ip) => on_v6(ip).map(Network::V6),
            Network::V6Mapped(m) => on_v6(&m.ipv6()).map(|v| Network::from_ipv6_view(v, true)),
        }
    }

    fn mismatch(&self, other: &Network) -> CidrError {
        CidrError::FamilyMismatch(self.to_string(), other.to_string())
    }

    pub fn family(&self) -> Family {
        match self {
            Network::V4(_) => Family::V4,
            Network::V6(_) | Network::V6Mapped(_) => Family::V6,
        }
    }

    /// Address width in bits.
    pub fn bits(&self) -> u8 {
        self.prefix().bits()
    }

    pub fn prefix(&self) -> Prefix {
        match self {
            Network::V4(ip) => ip.prefix(),
            Network::V6(ip) => ip.prefix(),
            Network::V6Mapped(m) => m.prefix(),
        }
    }

    /// Raw address value, widened to 128 bits.
    pub fn value(&self) -> u128 {
        match self {
            Network::V4(ip) => ip.value(),
            Network::V6(ip) => ip.value(),
            Network::V6Mapped(m) => m.ipv6().value(),
        }
    }

    pub fn size(&self) -> AddressCount {
        AddressCount::from_host_bits(self.prefix().host_length())
    }

    pub fn is_network(&self) -> bool {
        match self {
            Network::V4(ip) => ip.is_network(),
            Network::V6(ip) => ip.is_network(),
            Network::V6Mapped(m) => m.ipv6().is_network(),
        }
    }

    pub fn network(&self) -> Network {
        self.map_infallible(|ip| ip.network(), |ip| ip.network())
    }

    /// Broadcast (IPv4) or last (IPv6) address.
    pub fn broadcast(&self) -> Network {
        self.map_infallible(|ip| ip.broadcast(), |ip| ip.broadcast())
    }

    pub fn first(&self) -> Network {
        self.map_infallible(|ip| ip.first(), |ip| ip.first())
    }

    pub fn last(&self) -> Network {
        self.map_infallible(|ip| ip.last(), |ip| ip.last())
    }

    fn map_infallible<F4, F6>(&self, on_v4: F4, on_v6: F6) -> Network
    where
        F4: FnOnce(&Ipv4) -> Ipv4,
        F6: FnOnce(&Ipv6) -> Ipv6,
    {
        match self {
            Network::V4(ip) => Network::V4(on_v4(ip)),
            Network::V6(ip) => Network::V6(on_v6(ip)),
            Network::V6Mapped(m) => Network::from_ipv6_view(on_v6(&m.ipv6()), true),
        }
    }

    pub fn with_prefix(&self, length: u8) -> Result<Network, CidrError> {
        self.lift(|ip| ip.with_prefix(length), |ip| ip.with_prefix(length))
    }

    pub fn succ(&self) -> Result<Network, CidrError> {
        self.lift(|ip| ip.succ(), |ip| ip.succ())
    }

    pub fn pred(&self) -> Result<Network, CidrError> {
        self.lift(|ip| ip.pred(), |ip| ip.pred())
    }

    pub fn next_network(&self) -> Result<Network, CidrError> {
        self.lift(|ip| ip.next_network(), |ip| ip.next_network())
    }

    pub fn supernet(&self, length: u8) -> Result<Network, CidrError> {
        self.lift(|ip| ip.supernet(length), |ip| ip.supernet(length))
    }

    /// Subset test; both operands must share a family.
    pub fn includes(&self, other: &Network) -> Result<bool, CidrError> {
        match (self, other) {
            (Network::V4(a), Network::V4(b)) => Ok(a.includes(b)),
            _ => match (self.ipv6_view(), other.ipv6_view()) {
                (Some(a), Some(b)) => Ok(a.includes(&b)),
                _ => Err(self.mismatch(other)),
            },
        }
    }

    /// True when every network in `others` is included; `true` when empty.
    pub fn includes_all(&self, others: &[Network]) -> Result<bool, CidrError> {
        for other in others {
            if !self.includes(other)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Ordering that refuses to compare across families.
    pub fn compare(&self, other: &Network) -> Result<Ordering, CidrError> {
        if self.family() != other.family() {
            return Err(self.mismatch(other));
        }
        Ok(self.cmp(other))
    }

    /// Equal subnets of the given prefix length.
    pub fn subnets(&self, length: u8) -> Result<Vec<Network>, CidrError> {
        match self {
            Network::V4(ip) => Ok(ip.subnets(length)?.into_iter().map(Network::V4).collect()),
            Network::V6(ip) => Ok(ip.subnets(length)?.into_iter().map(Network::V6).collect()),
            Network::V6Mapped(m) => Ok(m
                .ipv6()
                .subnets(length)?
                .into_iter()
                .map(|v| Network::from_ipv6_view(v, true))
                .collect()),
        }
    }

    /// Exactly `count` contiguous subnets covering this network.
    pub fn split(&self, count: usize) -> Result<Vec<Network>, CidrError> {
        match self {
            Network::V4(ip) => Ok(ip.split(count)?.into_iter().map(Network::V4).collect()),
            Network::V6(ip) => Ok(ip.split(count)?.into_iter().map(Network::V6).collect()),
            Network::V6Mapped(m) => Ok(m
                .ipv6()
                .split(count)?
                .into_iter()
                .map(|v| Network::from_ipv6_view(v, true))
                .collect()),
        }
    }

    /// Aggregate same-family networks into the minimal covering set.
    ///
    /// Mapped inputs are aggregated as IPv6 and come back mapped when the
    /// result still lies inside `::ffff:0:0/96`.
    pub fn summarize(networks: &[Network]) -> Result<Vec<Network>, CidrError> {
        let first = match networks.first() {
            Some(first) => first,
            None => return Ok(Vec::new()),
        };
        if let Some(other) = networks.iter().find(|n| n.family() != first.family()) {
            return Err(first.mismatch(other));
        }

        match first.family() {
            Family::V4 => {
                let v4: Vec<Ipv4> = networks
                    .iter()
                    .filter_map(|n| match n {
                        Network::V4(ip) => Some(*ip),
                        _ => None,
                    })
                    .collect();
                Ok(processing::summarize(&v4)
                    .into_iter()
                    .map(Network::V4)
                    .collect())
            }
            Family::V6 => {
                let mapped = networks.iter().any(|n| n.is_mapped());
                let v6: Vec<Ipv6> = networks.iter().filter_map(|n| n.ipv6_view()).collect();
                Ok(processing::summarize(&v6)
                    .into_iter()
                    .map(|v| Network::from_ipv6_view(v, mapped))
                    .collect())
            }
        }
    }

    pub fn classify(&self) -> AddressClass {
        match self {
            Network::V4(ip) => ip.classify(),
            Network::V6(ip) => ip.classify(),
            Network::V6Mapped(m) => m.ipv6().classify(),
        }
    }

    /// Reverse-DNS name.
    pub fn reverse(&self) -> String {
        match self {
            Network::V4(ip) => ip.reverse(),
            Network::V6(ip) => ip.reverse(),
            Network::V6Mapped(m) => m.ipv6().reverse(),
        }
    }

    /// Big-endian bytes, 4 or 16 of them.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Network::V4(ip) => ip.to_bytes().to_vec(),
            Network::V6(ip) => ip.to_bytes().to_vec(),
            Network::V6Mapped(m) => m.ipv6().to_bytes().to_vec(),
        }
    }

    /// Address text without the prefix.
    pub fn addr_string(&self) -> String {
        match self {
            Network::V4(ip) => ip.addr_string(),
            Network::V6(ip) => ip.compressed(),
            Network::V6Mapped(m) => m.addr_string(),
        }
    }

    /// Netmask text: dotted for IPv4, `/len` for IPv6.
    pub fn netmask_string(&self) -> String {
        self.prefix()
            .to_dotted()
            .unwrap_or_else(|_| format!("/{}", self.prefix()))
    }

    /// Address as a string of binary digits.
    pub fn to_bits(&self) -> String {
        match self {
            Network::V4(ip) => ip.to_bits(),
            Network::V6(ip) => ip.to_bits(),
            Network::V6Mapped(m) => m.ipv6().to_bits(),
        }
    }
}

impl From<Ipv4> for Network {
    fn from(ip: Ipv4) -> Network {
        Network::V4(ip)
    }
}

impl From<Ipv6> for Network {
    fn from(ip: Ipv6) -> Network {
        Network::V6(ip)
    }
}

impl From<Ipv6Mapped> for Network {
    fn from(m: Ipv6Mapped) -> Network {
        Network::V6Mapped(m)
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Network) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Network {}

impl Ord for Network {
    fn cmp(&self, other: &Network) -> Ordering {
        (self.family(), self.value(), self.prefix().length()).cmp(&(
            other.family(),
            other.value(),
            other.prefix().length(),
        ))
    }
}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Network) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Network {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family().hash(state);
        self.value().hash(state);
        self.prefix().length().hash(state);
    }
}

impl FromStr for Network {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Network, CidrError> {
        Network::parse(s)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::V4(ip) => write!(f, "{ip}"),
            Network::V6(ip) => write!(f, "{ip}"),
            Network::V6Mapped(m) => write!(f, "{m}"),
        }
    }
}

/// Probe-style check of any supported literal.
pub fn valid(text: &str) -> bool {
    Network::parse(text).is_ok()
}
