//! Aggregation of networks into the smallest equivalent covering set.

use super::merge::merge_pair;
use crate::models::Cidr;

/// Summarize same-family networks.
///
/// Host bits are dropped first, so `10.0.1.1/24` counts as `10.0.1.0/24`.
/// The result is ascending, pairwise non-overlapping and covers exactly the
/// union of the input.
///
/// # Examples
/// ```
/// use cidr_algebra::models::Ipv4;
/// use cidr_algebra::processing::summarize;
/// let nets = [
///     Ipv4::new("172.16.10.0/24").unwrap(),
///     Ipv4::new("172.16.11.0/24").unwrap(),
/// ];
/// assert_eq!(summarize(&nets), vec![Ipv4::new("172.16.10.0/23").unwrap()]);
/// ```
pub fn summarize<T: Cidr>(networks: &[T]) -> Vec<T> {
    let with_host_bits = networks.iter().filter(|n| n.network_value() != n.value()).count();
    if with_host_bits > 0 {
        log::warn!("{with_host_bits} input(s) have host bits set, using their network address");
    }
    let mut list: Vec<T> = networks.iter().map(|n| n.network()).collect();
    list.sort();
    list.dedup();
    let mut list = drop_nested(list);
    if list.len() <= 1 {
        return list;
    }

    let mut pass = 0;
    loop {
        pass += 1;
        let merged = merge_pass(&mut list);
        log::debug!(
            "summarize pass {pass}: merged {merged} pair(s), {} network(s) left",
            list.len()
        );
        if merged == 0 {
            break;
        }
        list.sort();
    }
    list
}

/// Remove networks covered by another one. `sorted` must be ascending.
fn drop_nested<T: Cidr>(sorted: Vec<T>) -> Vec<T> {
    let mut kept: Vec<T> = Vec::with_capacity(sorted.len());
    for net in sorted {
        match kept.last() {
            Some(outer) if outer.includes(&net) => {
                log::trace!("drop {net}, covered by {outer}");
            }
            _ => kept.push(net),
        }
    }
    kept
}

/// One left-to-right scan that compacts `list` in place. `w` is the write
/// index; a merged parent is re-checked against the entry before it, so
/// carries cascade within the pass. Returns the number of merges.
fn merge_pass<T: Cidr>(list: &mut Vec<T>) -> usize {
    if list.is_empty() {
        return 0;
    }
    let mut merged = 0;
    let mut w = 0;
    for r in 1..list.len() {
        match merge_pair(&list[w], &list[r]) {
            Some(parent) => {
                list[w] = parent;
                merged += 1;
                while w > 0 {
                    match merge_pair(&list[w - 1], &list[w]) {
                        Some(parent) => {
                            w -= 1;
                            list[w] = parent;
                            merged += 1;
                        }
                        None => break,
                    }
                }
            }
            None => {
                w += 1;
                list.swap(w, r);
            }
        }
    }
    list.truncate(w + 1);
    merged
}
