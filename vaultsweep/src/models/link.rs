// src/models/link.rs
use std::fmt;

/// A parsed wikilink: `![[prefix/target#heading|alias]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub embed: bool,
    /// Folder path including its trailing separator, e.g. `Archive/People/`.
    pub prefix: Option<String>,
    /// Note name, possibly followed by a `#heading` or `#^block` anchor.
    pub target: String,
    pub alias: Option<String>,
}

impl LinkReference {
    /// Parses the text between `[[` and `]]`.
    #[inline]
    #[must_use]
    pub fn parse(inner: &str, embed: bool) -> Self {
        let (path, alias) = inner
            .split_once('|')
            .map_or((inner, None), |(path, alias)| (path, Some(alias.to_owned())));

        // A `/` inside a heading anchor is not a folder separator.
        let folders = path.find('#').map_or(path, |idx| &path[..idx]);
        let (prefix, target) = match folders.rfind('/') {
            Some(idx) => (Some(path[..=idx].to_owned()), path[idx + 1..].to_owned()),
            None => (None, path.to_owned()),
        };

        Self {
            embed,
            prefix,
            target,
            alias,
        }
    }

    /// Name the link resolves to, without anchor or `.md` extension.
    #[inline]
    #[must_use]
    pub fn note_name(&self) -> &str {
        let name = self
            .target
            .split_once('#')
            .map_or(self.target.as_str(), |(name, _)| name)
            .trim();
        let stem_len = name.len().saturating_sub(3);
        match name.get(stem_len..) {
            Some(ext) if stem_len > 0 && ext.eq_ignore_ascii_case(".md") => &name[..stem_len],
            _ => name,
        }
    }

    #[inline]
    #[must_use]
    pub const fn has_prefix(&self) -> bool {
        self.prefix.is_some()
    }

    /// The same link with its folder path dropped.
    #[inline]
    #[must_use]
    pub fn simplified(&self) -> Self {
        Self {
            prefix: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for LinkReference {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.embed {
            f.write_str("!")?;
        }
        f.write_str("[[")?;
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
        }
        f.write_str(&self.target)?;
        if let Some(alias) = &self.alias {
            write!(f, "|{alias}")?;
        }
        f.write_str("]]")
    }
}
