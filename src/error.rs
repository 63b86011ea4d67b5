//! Error kinds shared by every fallible operation in the crate.

use thiserror::Error;

/// Failure of a construction or an operation on CIDR values.
///
/// Every variant carries the offending input so the message can be shown to a
/// user as-is. Nothing here is transient: retrying the same call fails again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    /// Text does not match the IPv4 or IPv6 address grammar.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
    /// The `/suffix` is neither a prefix length nor a contiguous dotted netmask.
    #[error("Invalid netmask '{0}'")]
    InvalidNetmask(String),
    /// A prefix length, count or address offset outside the legal bound.
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    /// Operands of a binary operation belong to different address families.
    #[error("Address family mismatch: {0} vs {1}")]
    FamilyMismatch(String, String),
    /// Octet or group accessor beyond the fixed width of the address.
    #[error("Index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CidrError::InvalidAddress("10.0.0.256".to_string()).to_string(),
            "Invalid address '10.0.0.256'"
        );
        assert_eq!(
            CidrError::IndexOutOfRange { index: 4, len: 4 }.to_string(),
            "Index 4 out of range for 4 elements"
        );
        assert_eq!(
            CidrError::FamilyMismatch("10.0.0.0/8".into(), "::/0".into()).to_string(),
            "Address family mismatch: 10.0.0.0/8 vs ::/0"
        );
    }
}
