// src/core/links.rs
use crate::models::LinkReference;
use regex::Regex;
use std::sync::LazyLock;

// (!?)          embed marker
// \[\[ ... \]\] link body, no brackets or line breaks inside
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\[\]\n]+)\]\]").expect("wikilink pattern is valid")
});

/// A wikilink and its byte range in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    pub start: usize,
    pub end: usize,
    pub link: LinkReference,
}

/// Finds every wikilink and embed in `content`, in order.
#[must_use]
pub fn find_links(content: &str) -> Vec<LinkMatch> {
    WIKILINK
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let embed = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let inner = caps.get(2)?.as_str();
            Some(LinkMatch {
                start: whole.start(),
                end: whole.end(),
                link: LinkReference::parse(inner, embed),
            })
        })
        .collect()
}

/// Rebuilds `content`, replacing each link for which `rewrite` returns a new
/// rendering. Returns the new text and the number of replaced links.
pub fn rewrite_links<F>(content: &str, mut rewrite: F) -> (String, usize)
where
    F: FnMut(&LinkReference) -> Option<String>,
{
    let mut output = String::with_capacity(content.len());
    let mut last = 0;
    let mut count = 0;

    for found in find_links(content) {
        if let Some(replacement) = rewrite(&found.link) {
            output.push_str(&content[last..found.start]);
            output.push_str(&replacement);
            last = found.end;
            count += 1;
        }
    }
    output.push_str(&content[last..]);
    (output, count)
}
