// tests/integration_tests/dry_run_test.rs
use super::common::{create_test_file, setup_test_vault, snapshot};
use anyhow::Result;
use clap::Parser as _;
use tempfile::TempDir;
use vaultsweep::{Args, run};

fn run_dry(vault: &TempDir, command: &[&str]) -> Result<()> {
    let directory = vault.path().to_string_lossy().into_owned();
    let mut argv = vec!["vaultsweep", "-d", directory.as_str(), "--dry-run"];
    argv.extend_from_slice(command);
    run(Args::try_parse_from(argv)?)
}

#[test]
fn test_dry_run_leaves_vault_untouched() -> Result<()> {
    let vault = setup_test_vault()?;
    create_test_file(vault.path(), "Home.md.bak", "old home")?;
    create_test_file(
        vault.path(),
        "01 - Calendar/Daily/2025-03-21.md",
        "# Friday\n←← [[2025-W12 |THIS WEEK / [[2025-03-20 |-1D / [[2025-03-22 |+1D / [[2025-W13 |NEXT WEEK →→\n",
    )?;
    let source = TempDir::new()?;
    create_test_file(source.path(), "20250321.md", "- imported")?;
    create_test_file(source.path(), "20250321_attachments/photo.jpg", "jpg")?;
    let source_dir = source.path().to_string_lossy().into_owned();

    let before = snapshot(vault.path())?;

    run_dry(&vault, &["remove-tag"])?;
    run_dry(&vault, &["tag-to-link", "--tag", "idea", "--frontmatter"])?;
    run_dry(&vault, &["simplify-links"])?;
    run_dry(&vault, &["fix-nav"])?;
    run_dry(&vault, &["add-frontmatter", "--fallback"])?;
    run_dry(&vault, &["tags", "--output", "Tag plan.md"])?;
    run_dry(&vault, &["clean-backups"])?;
    run_dry(
        &vault,
        &["migrate-calendar", "--source", source_dir.as_str(), "--manifest", "manifest.json"],
    )?;

    let after = snapshot(vault.path())?;
    assert_eq!(
        before.keys().collect::<Vec<_>>(),
        after.keys().collect::<Vec<_>>(),
        "No file should be created or removed"
    );
    assert_eq!(before, after, "Bytes and mtimes should be identical");
    Ok(())
}
