//! Sibling test shared by the summarizer and the splitter.

use crate::models::Cidr;

/// Merge two adjacent networks into their common parent.
///
/// Succeeds only when `a` and `b` are distinct network values of the same
/// length, `a` is the lower half and the parent one bit shorter covers both,
/// so that `size(parent) == size(a) + size(b)`.
pub fn merge_pair<T: Cidr>(a: &T, b: &T) -> Option<T> {
    let length = a.prefix().length();
    if length == 0 || length != b.prefix().length() || a == b {
        return None;
    }
    let parent = a.supernet(length - 1).ok()?;
    if parent.value() != a.value() || !parent.includes(b) {
        return None;
    }
    if (a.size() + b.size()) != Some(parent.size()) {
        return None;
    }
    log::trace!("merge {a} + {b} -> {parent}");
    Some(parent)
}
