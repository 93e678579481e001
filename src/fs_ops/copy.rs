//! Structural copy: duplicate one entry by data, preserving its type.
//!
//! - Symlinks are recreated as symlinks with the same target; an existing
//!   destination entry is replaced, never written through.
//! - Regular files are byte-copied, overwriting the destination.
//! - Directories are copied recursively, each child by the same rules.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use super::helpers::io_error_with_help;

/// Duplicate the entry at `src` to `dest`, preserving its kind.
pub fn copy_structure(src: &Path, dest: &Path) -> Result<()> {
    let ftype = fs::symlink_metadata(src)
        .map_err(io_error_with_help("stat source", src))?
        .file_type();

    if ftype.is_symlink() {
        copy_symlink(src, dest)
    } else if ftype.is_dir() {
        copy_tree(src, dest)
    } else {
        fs::copy(src, dest).map_err(io_error_with_help("copy file", dest))?;
        Ok(())
    }
}

/// Recreate the symlink at `dest` with `src`'s target, replacing whatever
/// entry currently occupies `dest`.
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let target = fs::read_link(src).map_err(io_error_with_help("read symlink target", src))?;

    // Symlink creation never overwrites; clear the destination first. Stat
    // without following so an existing link is removed as a link, not as its
    // target.
    match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dest)
            .map_err(io_error_with_help("remove destination directory", dest))?,
        Ok(_) => {
            fs::remove_file(dest).map_err(io_error_with_help("remove destination entry", dest))?
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(io_error_with_help("stat destination", dest)(e)),
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(&target, dest)
        .map_err(io_error_with_help("create symlink", dest))?;

    #[cfg(windows)]
    {
        // Windows distinguishes file and directory links; pick by what the
        // target currently is, defaulting to a file link when it dangles.
        if fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false) {
            std::os::windows::fs::symlink_dir(&target, dest)
                .map_err(io_error_with_help("create symlink", dest))?;
        } else {
            std::os::windows::fs::symlink_file(&target, dest)
                .map_err(io_error_with_help("create symlink", dest))?;
        }
    }

    Ok(())
}

/// Copy the directory tree rooted at `src` into `dest`, each entry keeping
/// its own type. Symlinks inside the tree are not followed.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("walk '{}'", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("relativize '{}'", entry.path().display()))?;
        let to = dest.join(rel);

        let ftype = entry.file_type();
        if ftype.is_dir() {
            if !to.is_dir() {
                fs::create_dir_all(&to).map_err(io_error_with_help("create directory", &to))?;
            }
        } else if ftype.is_symlink() {
            copy_symlink(entry.path(), &to)?;
        } else {
            fs::copy(entry.path(), &to).map_err(io_error_with_help("copy file", &to))?;
        }
    }
    Ok(())
}
