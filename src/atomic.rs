//! Locked atomic file writes shared by the config and the file store

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Replace `path` with `content`.
///
/// An exclusive lock on a sibling `.lock` file keeps concurrent writes from
/// interleaving. It does not merge them: each caller replaces the whole
/// file, so the last writer wins. The content goes to a sibling `.tmp` file
/// first and is renamed over `path`, so readers never see a partial file. The parent
/// directory is created if needed.
pub(crate) fn write_locked(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(sibling(path, "lock"))?;
    lock_file.lock_exclusive()?;

    let temp_path = sibling(path, "tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;
    temp_file.write_all(content)?;
    temp_file.sync_all()?;

    std::fs::rename(&temp_path, path)?;

    // Lock is released when lock_file is dropped
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_locked_creates_parent_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        write_locked(&path, b"{}").unwrap();
        write_locked(&path, b"{\"a\":\"1\"}").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\":\"1\"}");
        assert!(!sibling(&path, "tmp").exists());
    }

    #[test]
    fn test_sibling_appends_suffix() {
        let path = Path::new("/tmp/storage.json");
        assert_eq!(sibling(path, "lock"), PathBuf::from("/tmp/storage.json.lock"));
    }
}
