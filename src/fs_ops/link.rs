//! Hardlink primitive with an explicit outcome.
//!
//! A hardlink either succeeds or fails in one of two very different ways:
//! either the filesystem refused in a way the caller can recover from by
//! copying instead (cross-device, permission, an occupied destination, a
//! source that vanished), or something genuinely broke. `try_hard_link`
//! keeps that distinction in the return type so callers switch on an
//! enumerated outcome rather than re-deriving it from error kinds.

use std::fs;
use std::io;
use std::path::Path;

/// What happened when a hardlink was attempted.
#[derive(Debug)]
pub enum LinkOutcome {
    /// The destination now shares the source's inode.
    Linked,
    /// The filesystem refused in one of the known recoverable ways. The
    /// original error is carried for diagnostics.
    Unsupported(io::Error),
}

/// Attempt to link `dest` to `src`'s data.
///
/// Returns `Ok(Unsupported(_))` for the closed set of refusals the caller is
/// expected to downgrade to a copy; every other failure is `Err` and fatal.
/// A symlink source is linked as the link itself, not its target.
pub fn try_hard_link(src: &Path, dest: &Path) -> io::Result<LinkOutcome> {
    match fs::hard_link(src, dest) {
        Ok(()) => Ok(LinkOutcome::Linked),
        Err(e) if is_link_refusal(&e) => Ok(LinkOutcome::Unsupported(e)),
        Err(e) => Err(e),
    }
}

/// The recoverable refusal set: cross-device, permission denied, destination
/// already exists, source not found.
fn is_link_refusal(e: &io::Error) -> bool {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        return matches!(
            code,
            libc::EXDEV | libc::EPERM | libc::EACCES | libc::EEXIST | libc::ENOENT
        );
    }

    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        // ERROR_FILE_NOT_FOUND, ERROR_PATH_NOT_FOUND, ERROR_ACCESS_DENIED,
        // ERROR_NOT_SAME_DEVICE, ERROR_FILE_EXISTS, ERROR_ALREADY_EXISTS
        return matches!(code, 2 | 3 | 5 | 17 | 80 | 183);
    }

    matches!(
        e.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::AlreadyExists | io::ErrorKind::NotFound
    )
}
