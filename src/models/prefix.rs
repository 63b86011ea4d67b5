//! Prefix length bounded to an address width.

use super::cidr::{get_cidr_mask, width_ones};
use crate::codec::ipv4::{format_dotted, parse_dotted};
use crate::error::CidrError;
use std::fmt;
use std::ops::{Add, Sub};

/// Width of an IPv4 address in bits.
pub const V4_BITS: u8 = 32;
/// Width of an IPv6 address in bits.
pub const V6_BITS: u8 = 128;

/// Number of leading network bits of an address of a given width.
///
/// Ordered by `length`; prefixes of different widths are never compared by
/// the algorithms in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix {
    length: u8,
    bits: u8,
}

impl Prefix {
    /// Create a prefix of `length` bits for an address `bits` wide.
    ///
    /// # Examples
    /// ```
    /// use cidr_algebra::models::Prefix;
    /// assert_eq!(Prefix::from_length(24, 32).unwrap().length(), 24);
    /// assert!(Prefix::from_length(33, 32).is_err());
    /// ```
    pub fn from_length(length: i32, bits: u8) -> Result<Prefix, CidrError> {
        if bits != V4_BITS && bits != V6_BITS {
            return Err(CidrError::OutOfRange(format!(
                "address width {bits} is neither {V4_BITS} nor {V6_BITS}"
            )));
        }
        if length < 0 || length > i32::from(bits) {
            return Err(CidrError::OutOfRange(format!(
                "prefix length {length} not in 0..={bits}"
            )));
        }
        Ok(Prefix {
            length: length as u8,
            bits,
        })
    }

    /// Prefix whose bounds the caller has already established.
    pub(crate) fn new_unchecked(length: u8, bits: u8) -> Prefix {
        debug_assert!((bits == V4_BITS || bits == V6_BITS) && length <= bits);
        Prefix { length, bits }
    }

    /// Full-width prefix of a host route.
    pub(crate) fn host_route(bits: u8) -> Prefix {
        Prefix::new_unchecked(bits, bits)
    }

    /// IPv4 prefix, `0..=32`.
    pub fn v4(length: u8) -> Result<Prefix, CidrError> {
        Prefix::from_length(i32::from(length), V4_BITS)
    }

    /// IPv6 prefix, `0..=128`.
    pub fn v6(length: u8) -> Result<Prefix, CidrError> {
        Prefix::from_length(i32::from(length), V6_BITS)
    }

    /// Parse a dotted IPv4 netmask such as `255.255.252.0`.
    ///
    /// The one bits must be left-contiguous; `0.255.0.255` is rejected rather
    /// than read as a 16-bit prefix.
    pub fn from_netmask(text: &str) -> Result<Prefix, CidrError> {
        let mask = parse_dotted(text).ok_or_else(|| CidrError::InvalidNetmask(text.to_string()))?;
        if mask.leading_ones() != mask.count_ones() {
            log::debug!("netmask {text} has non-contiguous bits {mask:032b}");
            return Err(CidrError::InvalidNetmask(text.to_string()));
        }
        Ok(Prefix {
            length: mask.count_ones() as u8,
            bits: V4_BITS,
        })
    }

    pub fn length(&self) -> u8 {
        self.length
    }

    /// Width of the address family this prefix belongs to.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Number of host bits, `bits - length`.
    pub fn host_length(&self) -> u8 {
        self.bits - self.length
    }

    /// Network mask with the top `length` bits set, within `bits` bits.
    pub fn to_mask(&self) -> u128 {
        get_cidr_mask(*self)
    }

    /// Complement of [`Prefix::to_mask`] within `bits` bits.
    pub fn hostmask(&self) -> u128 {
        !self.to_mask() & width_ones(self.bits)
    }

    /// Dotted-decimal netmask. Only defined for IPv4 prefixes.
    pub fn to_dotted(&self) -> Result<String, CidrError> {
        if self.bits != V4_BITS {
            return Err(CidrError::FamilyMismatch(
                format!("/{} (IPv6)", self.length),
                "dotted netmask (IPv4)".to_string(),
            ));
        }
        Ok(format_dotted(self.to_mask() as u32))
    }

    /// Mask as a string of `bits` ones and zeros.
    pub fn to_bit_string(&self) -> String {
        format!("{:0width$b}", self.to_mask(), width = usize::from(self.bits))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.length)
    }
}

// Arithmetic yields a raw length; re-validate with `Prefix::from_length`.

impl Add for Prefix {
    type Output = i32;

    fn add(self, other: Prefix) -> i32 {
        i32::from(self.length) + i32::from(other.length)
    }
}

impl Add<i32> for Prefix {
    type Output = i32;

    fn add(self, other: i32) -> i32 {
        i32::from(self.length) + other
    }
}

impl Sub for Prefix {
    type Output = i32;

    fn sub(self, other: Prefix) -> i32 {
        i32::from(self.length) - i32::from(other.length)
    }
}

impl Sub<i32> for Prefix {
    type Output = i32;

    fn sub(self, other: i32) -> i32 {
        i32::from(self.length) - other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_length() {
        assert_eq!(Prefix::from_length(0, 32).unwrap().length(), 0);
        assert_eq!(Prefix::from_length(32, 32).unwrap().length(), 32);
        assert_eq!(Prefix::from_length(128, 128).unwrap().length(), 128);
        assert!(Prefix::from_length(-1, 32).is_err());
        assert!(Prefix::from_length(33, 32).is_err());
        assert!(Prefix::from_length(129, 128).is_err());
        assert!(Prefix::from_length(8, 64).is_err());
    }

    #[test]
    fn test_from_netmask() {
        assert_eq!(Prefix::from_netmask("255.255.255.0").unwrap().length(), 24);
        assert_eq!(Prefix::from_netmask("255.255.252.0").unwrap().length(), 22);
        assert_eq!(Prefix::from_netmask("0.0.0.0").unwrap().length(), 0);
        assert_eq!(
            Prefix::from_netmask("255.255.255.255").unwrap().length(),
            32
        );
    }

    #[test]
    fn test_from_netmask_invalid() {
        assert!(matches!(
            Prefix::from_netmask("255.255.255"),
            Err(CidrError::InvalidNetmask(_))
        ));
        assert!(matches!(
            Prefix::from_netmask("255.255.255.256"),
            Err(CidrError::InvalidNetmask(_))
        ));
        assert!(matches!(
            Prefix::from_netmask("0.255.0.255"),
            Err(CidrError::InvalidNetmask(_))
        ));
    }

    #[test]
    fn test_masks() {
        let p = Prefix::v4(24).unwrap();
        assert_eq!(p.to_mask(), 0xFFFF_FF00);
        assert_eq!(p.hostmask(), 0xFF);
        assert_eq!(p.host_length(), 8);
        assert_eq!(p.to_dotted().unwrap(), "255.255.255.0");
        assert_eq!(p.to_bit_string(), "11111111111111111111111100000000");

        assert_eq!(Prefix::v4(0).unwrap().to_mask(), 0);
        assert_eq!(Prefix::v4(32).unwrap().hostmask(), 0);

        let p6 = Prefix::v6(64).unwrap();
        assert_eq!(p6.to_mask(), 0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000);
        assert_eq!(p6.hostmask(), 0xFFFF_FFFF_FFFF_FFFF);
        assert_eq!(Prefix::v6(0).unwrap().to_mask(), 0);
        assert_eq!(Prefix::v6(128).unwrap().to_mask(), u128::MAX);
        assert!(p6.to_dotted().is_err());
        assert_eq!(p6.to_bit_string().len(), 128);
    }

    #[test]
    fn test_arithmetic() {
        let a = Prefix::v4(24).unwrap();
        let b = Prefix::v4(8).unwrap();
        assert_eq!(a + b, 32);
        assert_eq!(a - b, 16);
        assert_eq!(b - a, -16);
        assert_eq!(a + 1, 25);
        assert_eq!(a + 16, 40);
        assert!(Prefix::from_length(a + 16, 32).is_err());
        assert!(Prefix::from_length(b - 9, 32).is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(Prefix::v4(8).unwrap() < Prefix::v4(16).unwrap());
        assert_eq!(Prefix::v4(8).unwrap().to_string(), "8");
    }
}
