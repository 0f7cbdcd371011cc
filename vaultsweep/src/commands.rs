// src/commands.rs
//! One module per subcommand. The vault and the write gate come from
//! [`crate::cli::run`].

pub mod add_frontmatter;
pub mod clean_backups;
pub mod duplicates;
pub mod fix_nav;
pub mod migrate_calendar;
pub mod missing_frontmatter;
pub mod remove_tag;
pub mod simplify_links;
pub mod tag_to_link;
pub mod tags;
