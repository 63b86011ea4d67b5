//! Exact address counts up to `2^128`.

use std::fmt;
use std::ops::Add;

/// Decimal text of `2^128`, the size of `::/0`.
const TWO_POW_128: &str = "340282366920938463463374607431768211456";

/// Number of addresses in a network, always a power of two.
///
/// Stored as the exponent so that `::/0` (one more than `u128::MAX`) stays
/// exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressCount {
    host_bits: u8,
}

impl AddressCount {
    pub fn from_host_bits(host_bits: u8) -> AddressCount {
        AddressCount { host_bits }
    }

    /// Exponent of the count, `log2(size)`.
    pub fn host_bits(&self) -> u8 {
        self.host_bits
    }

    /// The count as `u128`, or `None` for `2^128`.
    pub fn to_u128(&self) -> Option<u128> {
        1u128.checked_shl(u32::from(self.host_bits))
    }

    /// The count as `usize` when it fits.
    pub fn to_usize(&self) -> Option<usize> {
        1usize.checked_shl(u32::from(self.host_bits))
    }

    /// True when `n` addresses fit inside this count.
    pub fn holds(&self, n: u128) -> bool {
        self.to_u128().map_or(true, |size| n <= size)
    }
}

/// Two equal power-of-two counts sum to the next power; any other sum is not a
/// network size.
impl Add for AddressCount {
    type Output = Option<AddressCount>;

    fn add(self, other: AddressCount) -> Option<AddressCount> {
        if self.host_bits == other.host_bits && self.host_bits < 128 {
            Some(AddressCount::from_host_bits(self.host_bits + 1))
        } else {
            None
        }
    }
}

impl PartialEq<u128> for AddressCount {
    fn eq(&self, other: &u128) -> bool {
        self.to_u128() == Some(*other)
    }
}

impl fmt::Display for AddressCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_u128() {
            Some(size) => write!(f, "{size}"),
            None => f.write_str(TWO_POW_128),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        assert_eq!(AddressCount::from_host_bits(0), 1u128);
        assert_eq!(AddressCount::from_host_bits(8), 256u128);
        assert_eq!(AddressCount::from_host_bits(32).to_u128(), Some(1 << 32));
        assert_eq!(AddressCount::from_host_bits(128).to_u128(), None);
        assert_eq!(
            AddressCount::from_host_bits(128).to_string(),
            "340282366920938463463374607431768211456"
        );
        assert_eq!(
            AddressCount::from_host_bits(127).to_string(),
            (1u128 << 127).to_string()
        );
    }

    #[test]
    fn test_add() {
        let a = AddressCount::from_host_bits(6);
        assert_eq!(a + a, Some(AddressCount::from_host_bits(7)));
        assert_eq!(a + AddressCount::from_host_bits(5), None);
        let top = AddressCount::from_host_bits(127);
        assert_eq!(top + top, Some(AddressCount::from_host_bits(128)));
    }

    #[test]
    fn test_holds() {
        let c = AddressCount::from_host_bits(8);
        assert!(c.holds(256));
        assert!(!c.holds(257));
        assert!(AddressCount::from_host_bits(128).holds(u128::MAX));
    }
}
