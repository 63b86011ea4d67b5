//! IPv6 group text: expansion to eight zero-padded groups and canonical
//! compression of the longest zero run into `::`.

use crate::error::CidrError;
use itertools::Itertools;
use regex::Regex;
use std::sync::OnceLock;

/// Number of 16-bit groups in an IPv6 address.
pub const GROUPS: usize = 8;

static GROUP_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_group_regex() -> &'static Regex {
    GROUP_REGEX.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{1,4}$").expect("Invalid Regex"))
}

fn parse_groups(part: &str, text: &str) -> Result<Vec<u16>, CidrError> {
    if part.is_empty() {
        return Ok(Vec::new());
    }
    part.split(':')
        .map(|group| {
            if !get_group_regex().is_match(group) {
                return Err(CidrError::InvalidAddress(text.to_string()));
            }
            u16::from_str_radix(group, 16).map_err(|_| CidrError::InvalidAddress(text.to_string()))
        })
        .collect()
}

/// Decode an IPv6 literal (without prefix) into its eight groups.
///
/// Accepts at most one `::`, which stands for as many zero groups as needed to
/// reach eight in total.
pub fn expand_groups(text: &str) -> Result<[u16; GROUPS], CidrError> {
    let invalid = || CidrError::InvalidAddress(text.to_string());

    let mut groups = [0u16; GROUPS];
    match text.find("::") {
        None => {
            let parsed = parse_groups(text, text)?;
            if parsed.len() != GROUPS {
                return Err(invalid());
            }
            groups.copy_from_slice(&parsed);
        }
        Some(pos) => {
            let head = &text[..pos];
            let tail = &text[pos + 2..];
            // a second "::" or a ":::" run
            if tail.contains("::") || tail.starts_with(':') || head.ends_with(':') {
                return Err(invalid());
            }
            let head = parse_groups(head, text)?;
            let tail = parse_groups(tail, text)?;
            if head.len() + tail.len() > GROUPS - 1 {
                return Err(invalid());
            }
            groups[..head.len()].copy_from_slice(&head);
            groups[GROUPS - tail.len()..].copy_from_slice(&tail);
        }
    }
    Ok(groups)
}

/// Pack eight groups into the 128-bit address value.
pub fn groups_to_u128(groups: &[u16; GROUPS]) -> u128 {
    groups
        .iter()
        .fold(0u128, |acc, g| (acc << 16) | u128::from(*g))
}

/// Split a 128-bit address value into eight groups.
pub fn u128_to_groups(value: u128) -> [u16; GROUPS] {
    let mut groups = [0u16; GROUPS];
    for (i, group) in groups.iter_mut().enumerate() {
        *group = (value >> (16 * (GROUPS - 1 - i))) as u16;
    }
    groups
}

/// Eight groups as four lower-case hex digits each.
pub fn expand_from_groups(groups: &[u16; GROUPS]) -> String {
    groups.iter().map(|g| format!("{g:04x}")).join(":")
}

/// Find the longest run of at least two zero groups; ties go to the first.
fn longest_zero_run(groups: &[u16; GROUPS]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < GROUPS {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < GROUPS && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;
        if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }
    best
}

/// Canonical compressed text of eight groups.
///
/// Leading zeros are stripped from every group and the longest run of zero
/// groups becomes `::`. A lone zero group is left as `0`.
pub fn compress_groups(groups: &[u16; GROUPS]) -> String {
    let hex = |gs: &[u16]| gs.iter().map(|g| format!("{g:x}")).join(":");
    match longest_zero_run(groups) {
        None => hex(&groups[..]),
        Some((start, len)) => format!(
            "{}::{}",
            hex(&groups[..start]),
            hex(&groups[start + len..])
        ),
    }
}

/// Expand an IPv6 literal to its full eight-group, zero-padded form.
pub fn expand(text: &str) -> Result<String, CidrError> {
    Ok(expand_from_groups(&expand_groups(text)?))
}

/// Compress an IPv6 literal to its canonical short form.
pub fn compress(text: &str) -> Result<String, CidrError> {
    Ok(compress_groups(&expand_groups(text)?))
}
