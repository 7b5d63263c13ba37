//! Free-text search over registration numbers.
//!
//! Both sides are folded the same way before a substring test, so
//! `"ABC-123"`, `"abc123"` and `"abc 123"` are the same query, and `"mü"`
//! finds `"MU 12"`.

use crate::model::Item;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// CJK ideograph blocks kept verbatim by [`normalize`].
const CJK_RANGES: &[(u32, u32)] = &[
    (0x3005, 0x3007),   // 々 〆 〇
    (0x3400, 0x4DBF),   // Extension A
    (0x4E00, 0x9FFF),   // Unified Ideographs
    (0xF900, 0xFAFF),   // Compatibility Ideographs
    (0x20000, 0x2A6DF), // Extension B
    (0x2A700, 0x2EBEF), // Extensions C-F
    (0x30000, 0x3134F), // Extension G
];

fn is_cjk_ideograph(c: char) -> bool {
    let cp = c as u32;
    CJK_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Decomposes, lowercases and keeps only letters, digits and CJK ideographs.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || is_cjk_ideograph(*c))
        .collect()
}

/// Whether `item` matches `query`. A query with nothing left after
/// normalisation matches everything.
pub fn matches(item: &Item, query: &str) -> bool {
    let needle = normalize(query);
    needle.is_empty() || normalize(item.registration_number()).contains(&needle)
}

/// Keeps the items matching `query`, preserving order.
pub fn search(items: Vec<Item>, query: &str) -> Vec<Item> {
    let needle = normalize(query);
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| normalize(item.registration_number()).contains(&needle))
        .collect()
}
