// src/commands/duplicates.rs
use crate::core::vault::Vault;
use crate::reports::find_duplicates;
use crate::utils::print_duplicates;
use anyhow::Result;

#[inline]
pub fn run(vault: &Vault) -> Result<()> {
    print_duplicates(&find_duplicates(&vault.notes()));
    Ok(())
}
