//! Filesystem helpers shared by the profile store and the settings writer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Create `dir` and any missing parents, owner-only on Unix.
pub fn create_private_dir(dir: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

/// Replace `path` with `contents` via a sibling temp file and `rename`.
///
/// The target is either the old content or the new content, never a
/// truncated mix. The temp file is removed if any step fails.
///
/// Symlinks are followed so the real file is replaced, and an existing
/// file's permission bits carry over to the new content.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp = sibling(&target, "tmp");
    let guard = scopeguard::guard(tmp, |tmp| {
        let _ = fs::remove_file(tmp);
    });

    {
        let mut file = File::create(&*guard)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    if let Ok(meta) = fs::metadata(&target) {
        if meta.is_file() {
            fs::set_permissions(&*guard, meta.permissions())?;
        }
    }
    fs::rename(&*guard, &target)?;

    // Renamed away; nothing left to clean up.
    let _ = scopeguard::ScopeGuard::into_inner(guard);
    Ok(())
}

/// Take an exclusive advisory lock on `<path>.lock`.
///
/// The lock is held until the returned file is dropped.
pub fn lock_exclusive(path: &Path) -> io::Result<File> {
    let lock_path = sibling(path, "lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)?;
    FileExt::lock_exclusive(&file)?;
    Ok(file)
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "ccswitch".to_string());
    path.with_file_name(format!("{}.{}", file_name, suffix))
}
