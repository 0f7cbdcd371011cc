// tests/integration_tests/common.rs
use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;
use walkdir::WalkDir;

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn create_ignore_file(dir: &Path, patterns: &[&str]) -> Result<()> {
    let content = patterns.join("\n");
    create_test_file(dir, ".vaultignore", &content)
}

/// A small vault:
/// - `Home.md` has front matter and links into two folders
/// - `Alpha.md` exists in `Projects/` and `Archive/`
/// - `node_modules/` is excluded by default
pub fn setup_test_vault() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    create_test_file(
        root,
        "Home.md",
        "---\ntitle: Home\n---\nSee [[Projects/Alpha]] and [[Areas/Health|health]] #idea\n",
    )?;
    create_test_file(
        root,
        "Projects/Alpha.md",
        "# Alpha\nShipped #done and #done(2024-01-02 10:00)\n#idea/draft\n",
    )?;
    create_test_file(root, "Archive/Alpha.md", "# Old alpha\n")?;
    create_test_file(root, "Areas/Health.md", "Notes on #area/health\n")?;
    create_test_file(
        root,
        "Inbox/Todo.md",
        "---\ntags: [inbox]\n---\n- [ ] call #done\n",
    )?;
    create_test_file(root, "node_modules/pkg.md", "#vendored\n")?;
    create_test_file(root, "assets/diagram.png", "png")?;

    Ok(temp_dir)
}

/// Content and mtime of every file under `root`.
pub fn snapshot(root: &Path) -> Result<BTreeMap<PathBuf, (Vec<u8>, SystemTime)>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let modified = entry.metadata()?.modified()?;
            files.insert(entry.path().to_path_buf(), (fs::read(entry.path())?, modified));
        }
    }
    Ok(files)
}
