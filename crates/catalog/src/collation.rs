//! Locale-aware name ordering for "sort by name".
//!
//! Primary strength: accents and case are ignored (`Émigré` sorts with
//! `emigre`); ties on the primary key fall back to code-point order so the
//! ordering stays total.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Accent- and case-insensitive comparison key.
pub fn collation_key(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Total sort key: the collation key, then the raw name as tie-break.
pub fn sort_key(name: &str) -> (String, &str) {
    (collation_key(name), name)
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}
