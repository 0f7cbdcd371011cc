// src/core/vault.rs
use crate::config::Config;
use crate::core::ignore::{Patterns, load_ignore_patterns};
use crate::core::walker::Walker;
use anyhow::{Result, bail};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A vault root together with its configuration and ignore rules.
#[derive(Debug, Clone)]
pub struct Vault {
    root: PathBuf,
    config: Config,
    ignore_patterns: Patterns,
    recursive: bool,
}

impl Vault {
    /// Opens the vault at `dir`.
    ///
    /// # Errors
    ///
    /// This function may return an error if:
    /// * `dir` does not exist or is not a directory
    /// * The configuration file is missing (when given explicitly) or invalid
    /// * The `.vaultignore` file cannot be read or parsed
    #[inline]
    pub fn open(dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let root = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            env::current_dir()?.join(dir)
        };

        if !root.is_dir() {
            bail!("Vault directory does not exist: {}", root.display());
        }

        let config = Config::load(&root, config_path)?;
        let ignore_patterns = load_ignore_patterns(&root)?;
        debug!(root = %root.display(), "opened vault");

        Ok(Self {
            root,
            config,
            ignore_patterns,
            recursive: true,
        })
    }

    #[inline]
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Adds directory names to skip on top of the configured ones.
    #[inline]
    #[must_use]
    pub fn with_excludes<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for dir in dirs {
            let dir = dir.into();
            if !dir.is_empty() && !self.config.exclude.contains(&dir) {
                self.config.exclude.push(dir);
            }
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub const fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Walker over every file in the vault, honoring excludes and ignore rules.
    #[inline]
    #[must_use]
    pub fn walker(&self) -> Walker {
        Walker::new(&self.root)
            .recursive(self.recursive)
            .exclude_dirs(self.config.exclude.iter().cloned())
            .ignore_patterns(self.ignore_patterns.clone())
    }

    /// Walker over the whole vault tree that skips only hidden entries.
    /// Name lookups use it so excludes and ignore rules cannot hide a
    /// second file with the same name.
    #[inline]
    #[must_use]
    pub fn full_walker(&self) -> Walker {
        Walker::new(&self.root)
    }

    /// Walker over the Markdown notes in the vault.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Walker {
        self.walker().markdown()
    }

    /// Path relative to the vault root, or the path itself when outside it.
    #[inline]
    #[must_use]
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Resolves a configured path against the vault root.
    #[inline]
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}
