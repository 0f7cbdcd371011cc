// src/commands/missing_frontmatter.rs
use crate::core::vault::Vault;
use crate::reports::scan_frontmatter;
use crate::utils::print_frontmatter_stats;
use anyhow::Result;

/// Unreadable files are listed after the missing ones.
#[inline]
pub fn run(vault: &Vault) -> Result<()> {
    let stats = scan_frontmatter(&vault.notes());
    print_frontmatter_stats(&stats);
    Ok(())
}
