// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::core::gate::Gate;
use crate::core::pipeline::BatchOptions;
use crate::core::vault::Vault;

#[derive(Parser, Debug)]
#[command(author, version, about = "Batch maintenance for Obsidian vaults", long_about = None)]
pub struct Args {
    /// Vault directory (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub directory: PathBuf,

    /// Report what would change without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Do not keep a backup copy of rewritten files
    #[arg(long, global = true)]
    pub no_backup: bool,

    /// Keep the modification time of rewritten files
    #[arg(long, global = true)]
    pub preserve_mtime: bool,

    /// Only look at the top level of the vault
    #[arg(long, global = true)]
    pub no_recursive: bool,

    /// Extra directory names to skip (comma-separated)
    #[arg(short, long, value_delimiter = ',', global = true)]
    pub exclude: Vec<String>,

    /// Configuration file (defaults to <vault>/.vaultsweep.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete `#tag` and `#tag(<timestamp>)` markers from note bodies
    RemoveTag(RemoveTagArgs),
    /// Turn `#tag` markers into `[[wikilinks]]`
    TagToLink(TagToLinkArgs),
    /// Shorten `[[folder/Note]]` links to `[[Note]]` where the name is unique
    SimplifyLinks(BatchArgs),
    /// Generate YAML front matter for notes that have none
    AddFrontmatter(AddFrontmatterArgs),
    /// Repair the navigation row of daily notes
    FixNav(BatchArgs),
    /// List Markdown files without front matter
    MissingFrontmatter,
    /// List note names used by more than one file
    Duplicates,
    /// Count tag usage and write a tag-to-link conversion plan
    Tags(TagsArgs),
    /// Remove backup files whose original still exists
    CleanBackups,
    /// Import NotePlan calendar notes and attachments
    MigrateCalendar(MigrateCalendarArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct BatchArgs {
    /// Skip files larger than this many kilobytes
    #[arg(long = "max-size", value_name = "KB")]
    pub max_size_kb: Option<u64>,

    /// Skip this many files before processing starts
    #[arg(long, value_name = "N", default_value = "0")]
    pub start_at: usize,

    /// Stop after this many files
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,
}

impl BatchArgs {
    #[inline]
    #[must_use]
    pub const fn options(&self) -> BatchOptions {
        BatchOptions {
            max_size_kb: self.max_size_kb,
            start_at: self.start_at,
            max_files: self.max_files,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct RemoveTagArgs {
    /// Tag to remove, with or without the leading `#`
    #[arg(short, long, default_value = "done")]
    pub tag: String,

    #[command(flatten)]
    pub batch: BatchArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TagToLinkArgs {
    /// Tag to convert, with or without the leading `#`
    #[arg(short, long)]
    pub tag: String,

    /// Link target (defaults to the tag name)
    #[arg(short, long)]
    pub link: Option<String>,

    /// Leave nested tags such as `#tag/sub` alone
    #[arg(long)]
    pub exact: bool,

    /// Also move matching front-matter tags into `related`
    #[arg(long)]
    pub frontmatter: bool,

    #[command(flatten)]
    pub batch: BatchArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AddFrontmatterArgs {
    /// Analyzer command line, replacing `frontmatter.analyzer`
    #[arg(long, value_name = "COMMAND")]
    pub analyzer: Option<String>,

    /// Fill in basic fields offline when analysis fails
    #[arg(long)]
    pub fallback: bool,

    /// Replace front matter that already exists
    #[arg(long)]
    pub regenerate: bool,

    #[command(flatten)]
    pub batch: BatchArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TagsArgs {
    /// Only list tags used at least this many times in the report
    #[arg(long, default_value = "1")]
    pub min_count: u64,

    /// Ignore `#done` and `#done(...)` markers
    #[arg(long)]
    pub exclude_done: bool,

    /// Number of tags to print
    #[arg(short = 't', long, default_value = "20")]
    pub top: usize,

    /// Where to write the Markdown report, relative to the vault
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MigrateCalendarArgs {
    /// NotePlan calendar folder to import from
    #[arg(short, long)]
    pub source: PathBuf,

    /// Leave `_attachments` folders alone
    #[arg(long)]
    pub skip_attachments: bool,

    /// Write a JSON list of created and modified files here
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Opens the vault named by `args` and runs the selected command.
///
/// # Errors
///
/// Returns an error if the vault cannot be opened, the configuration is
/// invalid, or the command fails as a whole. Failures on single files are
/// reported and do not make the run fail.
#[inline]
pub fn run(args: Args) -> Result<()> {
    let vault = Vault::open(&args.directory, args.config.as_deref())?
        .with_recursive(!args.no_recursive)
        .with_excludes(args.exclude.iter().map(|dir| dir.trim().to_owned()));

    let backup_extension = Some(vault.config().backup_extension.clone())
        .filter(|extension| !args.no_backup && !extension.is_empty());
    let gate = Gate::new(args.dry_run)
        .backup_extension(backup_extension)
        .preserve_mtime(args.preserve_mtime);

    match &args.command {
        Command::RemoveTag(cmd) => commands::remove_tag::run(&vault, &gate, cmd),
        Command::TagToLink(cmd) => commands::tag_to_link::run(&vault, &gate, cmd),
        Command::SimplifyLinks(batch) => commands::simplify_links::run(&vault, &gate, batch),
        Command::AddFrontmatter(cmd) => commands::add_frontmatter::run(&vault, &gate, cmd),
        Command::FixNav(batch) => commands::fix_nav::run(&vault, &gate, batch),
        Command::MissingFrontmatter => commands::missing_frontmatter::run(&vault),
        Command::Duplicates => commands::duplicates::run(&vault),
        Command::Tags(cmd) => commands::tags::run(&vault, &gate, cmd),
        Command::CleanBackups => commands::clean_backups::run(&vault, &gate),
        Command::MigrateCalendar(cmd) => commands::migrate_calendar::run(&vault, &gate, cmd),
    }
}
