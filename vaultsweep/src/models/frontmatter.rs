// src/models/frontmatter.rs
use serde_yaml_ng::{Mapping, Value};

/// Parsed front matter: an ordered mapping of keys to YAML values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: Mapping,
}

impl Frontmatter {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn from_mapping(fields: Mapping) -> Self {
        Self { fields }
    }

    #[inline]
    #[must_use]
    pub const fn fields(&self) -> &Mapping {
        &self.fields
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Inserts or replaces a key. A new key goes to the end of the block.
    #[inline]
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.fields.insert(Value::String(key.to_owned()), value)
    }

    /// Removes a key, keeping the order of the remaining ones.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Tags listed under `tags`, either as a sequence or a comma/space separated string.
    #[inline]
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        match self.fields.get("tags") {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_owned()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|tag| !tag.is_empty())
                .collect(),
            Some(Value::String(s)) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }
}
