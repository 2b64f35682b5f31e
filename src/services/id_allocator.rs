// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Advisory business-number lookup.
//!
//! Scans existing record keys and reports the highest numeric suffix. The
//! value is a hint for the client only: nothing is reserved, so two callers
//! can read the same number and pick the same next id.

use crate::db::RecordStore;

/// Length of the id prefix in front of the number (`BIZ` in `BIZ042`).
pub const ID_PREFIX_LEN: usize = 3;

/// Numeric suffix of a record key, if it has one.
///
/// Leading digits after the prefix are used (`BIZ12a` gives 12); keys with
/// no digits there, or a number too large for `u64`, yield `None`.
pub fn parse_suffix(key: &str) -> Option<u64> {
    let rest = match key.char_indices().nth(ID_PREFIX_LEN) {
        Some((offset, _)) => &key[offset..],
        None => return None,
    };
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..digits_end].parse().ok()
}

/// Highest suffix among `keys`, or 0 if none parse.
pub fn max_suffix<'a>(keys: impl IntoIterator<Item = &'a str>) -> u64 {
    keys.into_iter()
        .filter_map(parse_suffix)
        .max()
        .unwrap_or(0)
}

/// Highest suffix among the stored records.
///
/// Never fails: an unreadable directory is logged and reported as 0.
pub async fn latest_suffix(store: &RecordStore) -> u64 {
    match store.list_keys().await {
        Ok(keys) => max_suffix(keys.iter().map(String::as_str)),
        Err(e) => {
            tracing::warn!(
                dir = %store.dir().display(),
                error = %e,
                "Could not scan records; reporting 0"
            );
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffix() {
        assert_eq!(parse_suffix("BIZ042"), Some(42));
        assert_eq!(parse_suffix("BIZ0"), Some(0));
        assert_eq!(parse_suffix("ABC7"), Some(7));
        assert_eq!(parse_suffix("BIZ12abc"), Some(12));
        assert_eq!(parse_suffix("BIZ 9"), Some(9));
        assert_eq!(parse_suffix("BIZ+5"), Some(5));
    }

    #[test]
    fn test_parse_suffix_ignores_malformed() {
        assert_eq!(parse_suffix("BIZ"), None);
        assert_eq!(parse_suffix("BI"), None);
        assert_eq!(parse_suffix(""), None);
        assert_eq!(parse_suffix("BIZabc"), None);
        assert_eq!(parse_suffix("BIZ-3"), None);
        assert_eq!(parse_suffix("BIZ99999999999999999999999"), None);
        // Prefix is counted in characters, not bytes
        assert_eq!(parse_suffix("ÄÖÜ15"), Some(15));
    }

    #[test]
    fn test_max_suffix() {
        assert_eq!(max_suffix(["BIZ001", "BIZ010", "BIZ002"]), 10);
        assert_eq!(max_suffix(["BIZ003", "readme", "BIZxyz"]), 3);
        assert_eq!(max_suffix(["junk", "x"]), 0);
        assert_eq!(max_suffix(std::iter::empty()), 0);
    }
}
