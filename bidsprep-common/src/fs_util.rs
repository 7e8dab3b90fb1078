//! File replacement helpers

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Replace the contents of an existing file without leaving it half-written
///
/// Writes `<path>.tmp` next to the target, copies the target's permissions
/// onto it, then renames it over the target.
pub fn replace_file(path: &Path, contents: &[u8]) -> Result<()> {
    let permissions = fs::metadata(path)?.permissions();
    let temp_path = temp_path_for(path);

    fs::write(&temp_path, contents)?;
    if let Err(e) = fs::set_permissions(&temp_path, permissions)
        .and_then(|_| fs::rename(&temp_path, path))
    {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
