//! Equal-size subnetting and exact-count splitting.

use super::merge::merge_pair;
use crate::config::{MAX_SUBNETS, MAX_SUBNET_BITS};
use crate::error::CidrError;
use crate::models::{Cidr, Prefix};

/// Every subnet of `network` with the given prefix length, ascending.
///
/// Subnet `i` starts at `network + i * 2^(BITS - length)`.
pub fn subnets<T: Cidr>(network: &T, length: u8) -> Result<Vec<T>, CidrError> {
    let current = network.prefix().length();
    if length < current {
        return Err(CidrError::OutOfRange(format!(
            "subnet length /{length} is shorter than {network}"
        )));
    }
    let prefix = Prefix::from_length(i32::from(length), T::BITS)?;
    let count_bits = length - current;
    if count_bits > MAX_SUBNET_BITS {
        return Err(CidrError::OutOfRange(format!(
            "{network} has 2^{count_bits} subnets of /{length}, limit is {MAX_SUBNETS}"
        )));
    }

    let base = network.network_value();
    let step_bits = u32::from(prefix.host_length());
    let result: Vec<T> = (0..1u128 << count_bits)
        .map(|i| T::from_parts(base + i.checked_shl(step_bits).unwrap_or(0), prefix))
        .collect();
    log::debug!("{network} -> {} subnet(s) of /{length}", result.len());
    Ok(result)
}

/// Split `network` into exactly `count` contiguous subnets.
///
/// Starts from the smallest power of two not below `count` and merges the
/// rightmost mergeable neighbours until `count` remain, so the larger blocks
/// end up at the high end: `/24` into 3 gives `/26, /26, /25`.
///
/// # Examples
/// ```
/// use cidr_algebra::models::{Cidr, Ipv4};
/// let parts = Ipv4::new("172.16.10.0/24").unwrap().split(3).unwrap();
/// let texts: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
/// assert_eq!(texts, ["172.16.10.0/26", "172.16.10.64/26", "172.16.10.128/25"]);
/// ```
pub fn split<T: Cidr>(network: &T, count: usize) -> Result<Vec<T>, CidrError> {
    if count == 0 || count > MAX_SUBNETS || !network.size().holds(count as u128) {
        return Err(CidrError::OutOfRange(format!(
            "cannot split {network} into {count} part(s)"
        )));
    }

    let extra_bits = count.next_power_of_two().trailing_zeros() as u8;
    let mut left = subnets(network, network.prefix().length() + extra_bits)?;
    let mut len = left.len();
    if len == count {
        log::debug!("split {network} into {count}: no merges");
        return Ok(left);
    }
    // `right` holds the settled tail, top of stack is its lowest network.
    let mut right: Vec<T> = Vec::new();

    while len > count {
        let a = match left.pop() {
            Some(a) => a,
            None => break,
        };
        match right.last().and_then(|b| merge_pair(&a, b)) {
            Some(parent) => {
                right.pop();
                left.push(parent);
                len -= 1;
            }
            None => right.push(a),
        }
    }
    if len != count {
        return Err(CidrError::OutOfRange(format!(
            "cannot split {network} into {count} part(s)"
        )));
    }

    left.extend(right.into_iter().rev());
    log::debug!("split {network} into {count}: {} merge(s)", (1usize << extra_bits) - count);
    Ok(left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4, Ipv6};

    fn v4(text: &str) -> Ipv4 {
        Ipv4::new(text).unwrap()
    }

    fn texts<T: Cidr>(list: &[T]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_subnets() {
        let result = subnets(&v4("10.0.0.0/24"), 26).unwrap();
        assert_eq!(
            texts(&result),
            ["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/26", "10.0.0.192/26"]
        );
        assert_eq!(subnets(&v4("10.0.0.9/24"), 24).unwrap(), vec![v4("10.0.0.0/24")]);
        assert_eq!(subnets(&v4("10.0.0.0/30"), 32).unwrap().len(), 4);
    }

    #[test]
    fn test_subnets_errors() {
        assert!(matches!(
            subnets(&v4("10.0.0.0/24"), 23),
            Err(CidrError::OutOfRange(_))
        ));
        assert!(matches!(
            subnets(&v4("10.0.0.0/24"), 33),
            Err(CidrError::OutOfRange(_))
        ));
        assert!(matches!(
            subnets(&v4("0.0.0.0/0"), 32),
            Err(CidrError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_subnets_v6() {
        let all = Ipv6::new("::/0").unwrap();
        assert_eq!(subnets(&all, 0).unwrap(), vec![all]);
        let halves = subnets(&all, 1).unwrap();
        assert_eq!(texts(&halves), ["::/1", "8000::/1"]);
        let net = Ipv6::new("2001:db8::/126").unwrap();
        assert_eq!(
            texts(&subnets(&net, 128).unwrap()),
            [
                "2001:db8::/128",
                "2001:db8::1/128",
                "2001:db8::2/128",
                "2001:db8::3/128"
            ]
        );
    }

    #[test]
    fn test_split_three() {
        let result = split(&v4("172.16.10.0/24"), 3).unwrap();
        assert_eq!(
            texts(&result),
            ["172.16.10.0/26", "172.16.10.64/26", "172.16.10.128/25"]
        );
    }

    #[test]
    fn test_split_eleven() {
        let result = split(&v4("10.0.0.0/24"), 11).unwrap();
        let lengths: Vec<u8> = result.iter().map(|n| n.prefix().length()).collect();
        assert_eq!(lengths, [28, 28, 28, 28, 28, 28, 28, 28, 27, 27, 26]);
        assert_eq!(result[8].to_string(), "10.0.0.128/27");
        assert_eq!(result[10].to_string(), "10.0.0.192/26");
    }

    #[test]
    fn test_split_power_of_two() {
        let net = v4("10.0.0.0/24");
        assert_eq!(split(&net, 4).unwrap(), subnets(&net, 26).unwrap());
        assert_eq!(split(&net, 1).unwrap(), vec![net]);
        assert_eq!(split(&net, 256).unwrap().len(), 256);
    }

    #[test]
    fn test_split_covers_network() {
        let net = v4("192.168.0.0/22");
        for count in 1..=64 {
            let parts = split(&net, count).unwrap();
            assert_eq!(parts.len(), count);
            assert_eq!(parts[0].network_value(), net.network_value());
            for pair in parts.windows(2) {
                assert_eq!(pair[0].broadcast_value() + 1, pair[1].network_value());
            }
            assert_eq!(parts[count - 1].broadcast_value(), net.broadcast_value());
        }
    }

    #[test]
    fn test_split_errors() {
        let net = v4("10.0.0.0/30");
        assert!(matches!(split(&net, 0), Err(CidrError::OutOfRange(_))));
        assert!(matches!(split(&net, 5), Err(CidrError::OutOfRange(_))));
        assert_eq!(split(&net, 4).unwrap().len(), 4);
        let huge = v4("0.0.0.0/0");
        assert!(matches!(
            split(&huge, MAX_SUBNETS + 1),
            Err(CidrError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_split_v6() {
        let net = Ipv6::new("2001:db8::/64").unwrap();
        let parts = split(&net, 3).unwrap();
        assert_eq!(
            texts(&parts),
            ["2001:db8::/66", "2001:db8:0:0:4000::/66", "2001:db8:0:0:8000::/65"]
        );
    }
}
