// src/reports.rs
mod duplicates;
mod missing_frontmatter;
mod tag_inventory;

pub use duplicates::find_duplicates;
pub use missing_frontmatter::scan_frontmatter;
pub use tag_inventory::TagInventory;
