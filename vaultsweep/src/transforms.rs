// src/transforms.rs
mod add_frontmatter;
mod daily_nav;
mod remove_tag;
mod simplify_links;
mod tag_to_link;

pub use add_frontmatter::AddFrontmatter;
pub use daily_nav::FixDailyNav;
pub use remove_tag::RemoveTag;
pub use simplify_links::{NoteIndex, SimplifyLinks};
pub use tag_to_link::TagToLink;

/// Whether `c` continues a word, as `\w` sees it.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Character before byte offset `pos`.
#[inline]
fn char_before(content: &str, pos: usize) -> Option<char> {
    content[..pos].chars().next_back()
}

/// Character at byte offset `pos`.
#[inline]
fn char_at(content: &str, pos: usize) -> Option<char> {
    content[pos..].chars().next()
}
