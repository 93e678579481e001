//! Metadata copier.
//! Propagates ownership, permissions, and timestamps from source to
//! destination after the structural transfer. Failures to read or apply
//! metadata are errors for the caller, with one exception: an unprivileged
//! process cannot chown to another user, so EPERM from ownership changes is
//! tolerated and logged.

use anyhow::{Context, Result};
use filetime::FileTime;
use std::fs;
use std::path::Path;

/// Synchronize `dest`'s metadata from `src`.
///
/// Symlink-aware: when the source entry is itself a symlink, times are set on
/// the link (not its target) and permission bits are skipped, since a link
/// carries none of its own.
pub fn copy_metadata(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(src).with_context(|| format!("stat '{}'", src.display()))?;
    let is_symlink = meta.file_type().is_symlink();

    // Ownership before mode: chown can clear setuid/setgid bits.
    #[cfg(unix)]
    copy_ownership(&meta, dest, is_symlink)?;

    if !is_symlink {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = meta.permissions().mode() & 0o7777;
            fs::set_permissions(dest, fs::Permissions::from_mode(mode))
                .with_context(|| format!("set permissions on '{}'", dest.display()))?;
        }
        #[cfg(windows)]
        {
            let mut perms = fs::metadata(dest)
                .with_context(|| format!("stat '{}'", dest.display()))?
                .permissions();
            perms.set_readonly(meta.permissions().readonly());
            fs::set_permissions(dest, perms)
                .with_context(|| format!("set readonly attribute on '{}'", dest.display()))?;
        }
    }

    // Timestamps last; every earlier step mutates the destination.
    let (atime, mtime) = source_times(&meta)?;
    if is_symlink {
        filetime::set_symlink_file_times(dest, atime, mtime)
            .with_context(|| format!("set times on '{}'", dest.display()))?;
    } else {
        filetime::set_file_times(dest, atime, mtime)
            .with_context(|| format!("set times on '{}'", dest.display()))?;
    }

    copy_xattrs(src, dest);

    Ok(())
}

fn source_times(meta: &fs::Metadata) -> Result<(FileTime, FileTime)> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok((
            FileTime::from_unix_time(meta.atime(), meta.atime_nsec() as u32),
            FileTime::from_unix_time(meta.mtime(), meta.mtime_nsec() as u32),
        ))
    }
    #[cfg(not(unix))]
    {
        let at = meta.accessed().context("source access time unavailable")?;
        let mt = meta.modified().context("source modified time unavailable")?;
        Ok((
            FileTime::from_system_time(at),
            FileTime::from_system_time(mt),
        ))
    }
}

#[cfg(unix)]
fn copy_ownership(meta: &fs::Metadata, dest: &Path, is_symlink: bool) -> Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::MetadataExt;
    use tracing::debug;

    let dest_c = CString::new(dest.as_os_str().as_bytes())
        .with_context(|| format!("path contains NUL: '{}'", dest.display()))?;
    let rc = unsafe {
        if is_symlink {
            libc::lchown(dest_c.as_ptr(), meta.uid(), meta.gid())
        } else {
            libc::chown(dest_c.as_ptr(), meta.uid(), meta.gid())
        }
    };
    if rc != 0 {
        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::EPERM) {
            debug!(
                path = %dest.display(),
                uid = meta.uid(),
                gid = meta.gid(),
                "skipping chown without privilege"
            );
            return Ok(());
        }
        return Err(err).with_context(|| format!("chown '{}'", dest.display()));
    }
    Ok(())
}

#[cfg(all(unix, feature = "xattrs"))]
fn copy_xattrs(src: &Path, dest: &Path) {
    use tracing::warn;

    // Best-effort: many filesystems and sandboxes reject xattrs outright.
    match xattr::list(src) {
        Ok(names) => {
            for name in names {
                match xattr::get(src, &name) {
                    Ok(Some(value)) => {
                        if let Err(e) = xattr::set(dest, &name, &value) {
                            warn!(
                                dest = %dest.display(),
                                xattr = %name.to_string_lossy(),
                                error = %e,
                                "failed to set xattr on destination"
                            );
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(
                            src = %src.display(),
                            xattr = %name.to_string_lossy(),
                            error = %e,
                            "failed to read xattr from source"
                        );
                    }
                }
            }
        }
        Err(e) => warn!(src = %src.display(), error = %e, "failed to list xattrs"),
    }
}

#[cfg(not(all(unix, feature = "xattrs")))]
fn copy_xattrs(_src: &Path, _dest: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[test]
    fn propagates_mode_bits() {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dest = td.path().join("dest");
        fs::write(&src, "s").unwrap();
        fs::write(&dest, "d").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o640)).unwrap();

        copy_metadata(&src, &dest).unwrap();
        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn propagates_modified_time() {
        let td = tempdir().unwrap();
        let src = td.path().join("src");
        let dest = td.path().join("dest");
        fs::write(&src, "s").unwrap();
        fs::write(&dest, "d").unwrap();

        let stamp = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_times(&src, stamp, stamp).unwrap();

        copy_metadata(&src, &dest).unwrap();
        let got = FileTime::from_last_modification_time(&fs::metadata(&dest).unwrap());
        assert_eq!(got.unix_seconds(), 1_000_000_000);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_source_sets_times_on_the_link() {
        use std::os::unix::fs::symlink;
        let td = tempdir().unwrap();
        let target = td.path().join("target");
        fs::write(&target, "t").unwrap();
        let src = td.path().join("src_link");
        let dest = td.path().join("dest_link");
        symlink(&target, &src).unwrap();
        symlink(&target, &dest).unwrap();

        copy_metadata(&src, &dest).unwrap();
        // The link itself was touched, not the target file.
        assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "t");
    }
}
