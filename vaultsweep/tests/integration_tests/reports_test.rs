// tests/integration_tests/reports_test.rs
use super::common::{create_test_file, setup_test_vault};
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;
use vaultsweep::core::vault::Vault;
use vaultsweep::reports::{TagInventory, find_duplicates, scan_frontmatter};

#[test]
fn test_duplicates_are_grouped_by_name() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?;

    let duplicates = find_duplicates(&vault.notes());
    assert_eq!(duplicates.len(), 1);
    assert_eq!(
        duplicates.get("Alpha.md"),
        Some(&vec![
            PathBuf::from("Archive/Alpha.md"),
            PathBuf::from("Projects/Alpha.md")
        ])
    );
    Ok(())
}

#[test]
fn test_no_duplicates_gives_empty_result() -> Result<()> {
    let temp_dir = TempDir::new()?;
    create_test_file(temp_dir.path(), "a.md", "a")?;
    create_test_file(temp_dir.path(), "sub/b.md", "b")?;
    let vault = Vault::open(temp_dir.path(), None)?;

    assert!(find_duplicates(&vault.notes()).is_empty());
    Ok(())
}

#[test]
fn test_tag_inventory_totals_are_exact() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?;

    let inventory = TagInventory::scan(&vault.notes(), false);
    assert_eq!(inventory.files_scanned, 5);
    assert_eq!(inventory.len(), 4);
    assert_eq!(inventory.total_occurrences(), 6);
    assert_eq!(inventory.get("#done").map(|record| record.count), Some(3));
    assert!(inventory.get("#vendored").is_none(), "node_modules is excluded");

    let top: Vec<&str> = inventory
        .sorted()
        .into_iter()
        .map(|record| record.tag.as_str())
        .collect();
    assert_eq!(top, vec!["#done", "#area/health", "#idea", "#idea/draft"]);

    let without_done = TagInventory::scan(&vault.notes(), true);
    assert_eq!(without_done.total_occurrences(), 3);
    Ok(())
}

#[test]
fn test_missing_frontmatter_report() -> Result<()> {
    let temp_dir = setup_test_vault()?;
    let vault = Vault::open(temp_dir.path(), None)?;

    let stats = scan_frontmatter(&vault.notes());
    assert_eq!(stats.total_files, 5);
    assert_eq!(stats.with_frontmatter, 2);
    assert_eq!(
        stats.missing,
        vec![
            PathBuf::from("Archive/Alpha.md"),
            PathBuf::from("Areas/Health.md"),
            PathBuf::from("Projects/Alpha.md"),
        ]
    );
    assert!((stats.calculate_percentage() - 40.0).abs() < f64::EPSILON);
    assert!((stats.missing_percentage() - 60.0).abs() < f64::EPSILON);
    Ok(())
}
