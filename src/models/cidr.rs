//! Range derivation shared by both address families.
//!
//! The free functions work on a raw `(value, prefix)` pair; the [`Cidr`] trait
//! puts them behind one capability set implemented by [`Ipv4`](super::Ipv4)
//! and [`Ipv6`](super::Ipv6), so the summarizer and splitter are written once.

use super::{AddressCount, Prefix};
use crate::error::CidrError;
use crate::processing;
use std::fmt;
use std::hash::Hash;

/// All ones in the low `bits` bits.
pub fn width_ones(bits: u8) -> u128 {
    if bits >= 128 {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

/// Convert a prefix to its network mask, within the prefix's address width.
///
/// # Examples
/// ```
/// use cidr_algebra::models::{get_cidr_mask, Prefix};
/// assert_eq!(get_cidr_mask(Prefix::v4(24).unwrap()), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(prefix: Prefix) -> u128 {
    let all_bits = width_ones(prefix.bits());
    let right_len = u32::from(prefix.host_length());
    all_bits.checked_shl(right_len).unwrap_or(0) & all_bits
}

/// Network address: the value with all host bits cleared.
pub fn cut_addr(value: u128, prefix: Prefix) -> u128 {
    value & get_cidr_mask(prefix)
}

/// Broadcast (v4) or last (v6) address: the value with all host bits set.
pub fn broadcast_addr(value: u128, prefix: Prefix) -> u128 {
    cut_addr(value, prefix) | prefix.hostmask()
}

/// First usable host.
///
/// Point-to-point (`/31`, `/127`) and host routes have no distinct network
/// address, so the network address itself is returned.
pub fn first_host(value: u128, prefix: Prefix) -> u128 {
    let network = cut_addr(value, prefix);
    if prefix.host_length() <= 1 {
        network
    } else {
        network + 1
    }
}

/// Last usable host, the mirror image of [`first_host`].
pub fn last_host(value: u128, prefix: Prefix) -> u128 {
    let broadcast = broadcast_addr(value, prefix);
    if prefix.host_length() <= 1 {
        broadcast
    } else {
        broadcast - 1
    }
}

/// Address right after the subnet, or `None` past the end of the address space.
pub fn ip_after_subnet(value: u128, prefix: Prefix) -> Option<u128> {
    broadcast_addr(value, prefix)
        .checked_add(1)
        .filter(|next| *next <= width_ones(prefix.bits()))
}

mod private {
    pub trait Sealed {}

    impl Sealed for crate::models::Ipv4 {}
    impl Sealed for crate::models::Ipv6 {}
}

/// Capabilities common to every single-family CIDR value.
///
/// Ordering follows the derived `Ord` of the implementors: address value first,
/// then prefix length, so `10.0.0.0/8 < 10.0.0.0/16`.
pub trait Cidr: private::Sealed + Copy + Ord + Hash + fmt::Debug + fmt::Display {
    /// Address width in bits.
    const BITS: u8;

    /// Raw address value, always `< 2^BITS`.
    fn value(&self) -> u128;

    fn prefix(&self) -> Prefix;

    /// Rebuild a value of this family; bits above `BITS` are discarded.
    #[doc(hidden)]
    fn from_parts(value: u128, prefix: Prefix) -> Self;

    fn mask(&self) -> u128 {
        get_cidr_mask(self.prefix())
    }

    fn network_value(&self) -> u128 {
        cut_addr(self.value(), self.prefix())
    }

    fn broadcast_value(&self) -> u128 {
        broadcast_addr(self.value(), self.prefix())
    }

    fn first_host_value(&self) -> u128 {
        first_host(self.value(), self.prefix())
    }

    fn last_host_value(&self) -> u128 {
        last_host(self.value(), self.prefix())
    }

    /// Number of addresses covered, `2^(BITS - length)`.
    fn size(&self) -> AddressCount {
        AddressCount::from_host_bits(self.prefix().host_length())
    }

    /// True when the value is its own network address and not a host route.
    fn is_network(&self) -> bool {
        self.network_value() == self.value() && self.prefix().length() < Self::BITS
    }

    /// Network address with the same prefix.
    fn network(&self) -> Self {
        Self::from_parts(self.network_value(), self.prefix())
    }

    /// Broadcast (last) address with the same prefix.
    fn broadcast(&self) -> Self {
        Self::from_parts(self.broadcast_value(), self.prefix())
    }

    /// First usable host with the same prefix.
    fn first(&self) -> Self {
        Self::from_parts(self.first_host_value(), self.prefix())
    }

    /// Last usable host with the same prefix.
    fn last(&self) -> Self {
        Self::from_parts(self.last_host_value(), self.prefix())
    }

    /// Same address under a different prefix length.
    fn with_prefix(&self, length: u8) -> Result<Self, CidrError> {
        let prefix = Prefix::from_length(i32::from(length), Self::BITS)?;
        Ok(Self::from_parts(self.value(), prefix))
    }

    /// True when every address of `other` lies inside `self`.
    fn includes(&self, other: &Self) -> bool {
        self.prefix().length() <= other.prefix().length()
            && self.network_value() == other.value() & self.mask()
    }

    /// Conjunction of [`Cidr::includes`]; vacuously true for an empty slice.
    fn includes_all(&self, others: &[Self]) -> bool {
        others.iter().all(|other| self.includes(other))
    }

    /// Next address, keeping the prefix.
    fn succ(&self) -> Result<Self, CidrError> {
        self.value()
            .checked_add(1)
            .filter(|next| *next <= width_ones(Self::BITS))
            .map(|next| Self::from_parts(next, self.prefix()))
            .ok_or_else(|| CidrError::OutOfRange(format!("no address after {self}")))
    }

    /// Previous address, keeping the prefix.
    fn pred(&self) -> Result<Self, CidrError> {
        self.value()
            .checked_sub(1)
            .map(|prev| Self::from_parts(prev, self.prefix()))
            .ok_or_else(|| CidrError::OutOfRange(format!("no address before {self}")))
    }

    /// The network of the same size directly after this one.
    fn next_network(&self) -> Result<Self, CidrError> {
        ip_after_subnet(self.value(), self.prefix())
            .map(|next| Self::from_parts(next, self.prefix()))
            .ok_or_else(|| CidrError::OutOfRange(format!("no network after {self}")))
    }

    /// Enclosing network with a shorter prefix length.
    fn supernet(&self, length: u8) -> Result<Self, CidrError> {
        if length > self.prefix().length() {
            return Err(CidrError::OutOfRange(format!(
                "supernet /{length} is longer than {self}"
            )));
        }
        let prefix = Prefix::from_length(i32::from(length), Self::BITS)?;
        Ok(Self::from_parts(cut_addr(self.value(), prefix), prefix))
    }

    /// Every usable host, each as a host route.
    fn hosts(&self) -> Hosts<Self> {
        Hosts {
            next: Some(self.first_host_value()),
            last: self.last_host_value(),
            _family: std::marker::PhantomData,
        }
    }

    /// Equal subnets of the given prefix length.
    fn subnets(&self, length: u8) -> Result<Vec<Self>, CidrError> {
        processing::subnets(self, length)
    }

    /// Exactly `count` contiguous subnets covering this network.
    fn split(&self, count: usize) -> Result<Vec<Self>, CidrError> {
        processing::split(self, count)
    }
}

/// Iterator over the usable hosts of a network, see [`Cidr::hosts`].
#[derive(Debug, Clone)]
pub struct Hosts<T> {
    next: Option<u128>,
    last: u128,
    _family: std::marker::PhantomData<T>,
}

impl<T: Cidr> Iterator for Hosts<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next?;
        self.next = if current < self.last {
            Some(current + 1)
        } else {
            None
        };
        Some(T::from_parts(current, Prefix::host_route(T::BITS)))
    }
}
