// src/models.rs
mod frontmatter;
mod frontmatter_stats;
mod link;
mod note;
mod run_report;
mod tag_record;

pub use frontmatter::Frontmatter;
pub use frontmatter_stats::FrontmatterStats;
pub use link::LinkReference;
pub use note::Note;
pub use run_report::{FileChange, FileEvent, RunReport};
pub use tag_record::TagRecord;
