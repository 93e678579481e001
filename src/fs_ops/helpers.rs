//! I/O helper utilities.
//!
//! Adapters that enrich an io::Error with the failing operation, the path,
//! and a short actionable hint, for use with map_err in anyhow code paths:
//!
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a message with op/path plus a platform-aware hint.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    match e.raw_os_error() {
        Some(code) => {
            #[cfg(unix)]
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and mode)");
                }
                libc::EXDEV => {
                    msg.push_str(" (source and destination are on different filesystems)");
                }
                libc::ENOENT => msg.push_str(" (path not found)"),
                libc::EEXIST => msg.push_str(" (already exists)"),
                libc::ENOTDIR => msg.push_str(" (a path component is not a directory)"),
                libc::ENOSPC => msg.push_str(" (no space left on device)"),
                libc::EROFS => msg.push_str(" (read-only filesystem)"),
                libc::EMLINK => msg.push_str(" (too many links to the source file)"),
                _ => {}
            }
            #[cfg(windows)]
            match code {
                5 => msg.push_str(" (access denied)"),                              // ERROR_ACCESS_DENIED
                2 | 3 => msg.push_str(" (path not found)"),                         // FILE/PATH_NOT_FOUND
                17 => msg.push_str(" (source and destination are on different volumes)"), // ERROR_NOT_SAME_DEVICE
                80 | 183 => msg.push_str(" (already exists)"),                      // FILE_EXISTS/ALREADY_EXISTS
                112 => msg.push_str(" (insufficient disk space)"),                  // ERROR_DISK_FULL
                _ => {}
            }
            #[cfg(not(any(unix, windows)))]
            let _ = code;
        }
        None => match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" (permission denied; check ownership and mode)");
            }
            io::ErrorKind::NotFound => msg.push_str(" (path not found)"),
            io::ErrorKind::AlreadyExists => msg.push_str(" (already exists)"),
            _ => {}
        },
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` converting io::Error into
/// an anyhow::Error carrying the enriched message.
pub(super) fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
