// src/core/tags.rs
//! Tag tokens in note text.
//!
//! A tag is `#` followed by `[A-Za-z0-9_/.-]+`, not preceded by a word
//! character, `#`, `&` or `/`. Trailing `.` and `/` are not part of the tag
//! and purely numeric names (`#123`) are not tags.

use regex::Regex;
use std::sync::LazyLock;

/// A tag token and its byte range in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagToken<'a> {
    /// Tag text including the leading `#`.
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl TagToken<'_> {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.text[1..]
    }
}

// No look-behind in `regex`: the boundary character is matched and the tag
// is capture group 1.
static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w#&/])(#[A-Za-z0-9_/.-]+)").expect("tag pattern is valid")
});

/// Finds every tag token in `content`, in order.
#[must_use]
pub fn scan(content: &str) -> Vec<TagToken<'_>> {
    TAG.captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .filter_map(|found| {
            let name = found.as_str()[1..].trim_end_matches(['.', '/']);
            if name.is_empty() || name.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let end = found.start() + 1 + name.len();
            Some(TagToken {
                text: &content[found.start()..end],
                start: found.start(),
                end,
            })
        })
        .collect()
}
