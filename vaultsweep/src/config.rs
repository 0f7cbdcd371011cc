// src/config.rs
use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = ".vaultsweep.toml";

/// Settings read from `.vaultsweep.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory names that are never walked.
    pub exclude: Vec<String>,
    pub backup_extension: String,
    pub frontmatter: FrontmatterConfig,
    pub calendar: CalendarConfig,
    pub attachments: AttachmentsConfig,
    pub tags: TagsConfig,
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            exclude: vec!["node_modules".to_owned(), "__pycache__".to_owned()],
            backup_extension: "bak".to_owned(),
            frontmatter: FrontmatterConfig::default(),
            calendar: CalendarConfig::default(),
            attachments: AttachmentsConfig::default(),
            tags: TagsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontmatterConfig {
    /// Note that describes how front matter should look; sent to the
    /// analyzer and never rewritten itself.
    pub rules_file: String,
    /// Analyzer command and arguments.
    pub analyzer: Vec<String>,
    pub timeout_secs: u64,
    pub retries: u32,
    /// Characters of note content sent to the analyzer.
    pub max_chars: usize,
    pub default_type: String,
    pub default_tag: String,
}

impl Default for FrontmatterConfig {
    #[inline]
    fn default() -> Self {
        Self {
            rules_file: "How to write YAML in Obsidian.md".to_owned(),
            analyzer: Vec::new(),
            timeout_secs: 60,
            retries: 2,
            max_chars: 2500,
            default_type: "[[Notes]]".to_owned(),
            default_tag: "#untagged".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    pub daily_dir: PathBuf,
    pub weekly_dir: PathBuf,
    pub monthly_dir: PathBuf,
    pub quarterly_dir: PathBuf,
    pub yearly_dir: PathBuf,
    /// Name of the source app, used in merge separators.
    pub import_label: String,
}

impl Default for CalendarConfig {
    #[inline]
    fn default() -> Self {
        Self {
            daily_dir: PathBuf::from("01 - Calendar/Daily"),
            weekly_dir: PathBuf::from("01 - Calendar/Weekly"),
            monthly_dir: PathBuf::from("01 - Calendar/Monthly"),
            quarterly_dir: PathBuf::from("01 - Calendar/Quarterly"),
            yearly_dir: PathBuf::from("01 - Calendar/Yearly"),
            import_label: "NotePlan".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttachmentsConfig {
    pub audio: PathBuf,
    pub image: PathBuf,
    pub document: PathBuf,
    pub video: PathBuf,
}

impl Default for AttachmentsConfig {
    #[inline]
    fn default() -> Self {
        Self {
            audio: PathBuf::from("99 - Meta/99 - Files/Audio"),
            image: PathBuf::from("99 - Meta/99 - Files/Images"),
            document: PathBuf::from("99 - Meta/99 - Files/PDFs"),
            video: PathBuf::from("99 - Meta/99 - Files/Videos"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagsConfig {
    /// Where `tags` writes its Markdown report, relative to the vault.
    pub report_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for a vault.
    ///
    /// An explicit `path` must exist. Otherwise `.vaultsweep.toml` in the
    /// vault root is used when present, and defaults when not.
    ///
    /// # Errors
    ///
    /// This function may return an error if:
    /// * An explicitly given file does not exist or cannot be read
    /// * The file is not valid TOML or has unknown keys
    #[inline]
    pub fn load(vault_root: &Path, path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = vault_root.join(CONFIG_FILE);
                if !default.is_file() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses TOML configuration text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or has unknown keys.
    #[inline]
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
