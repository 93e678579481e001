//! Single-entry transfer into the staging tree.
//! - Classifies the source once and dispatches on the cached kind.
//! - Hardlinks non-directory entries where the filesystem allows, copies otherwise.
//! - Synchronizes metadata from source to destination before returning.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::errors::TransferError;

use super::copy::copy_structure;
use super::helpers::io_error_with_help;
use super::link::{LinkOutcome, try_hard_link};
use super::metadata::copy_metadata;

/// Policy knobs for a transfer.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Prefer hardlinks for non-directory entries, falling back to a copy when
    /// the filesystem refuses. Set to false to always copy.
    pub hardlink: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self { hardlink: true }
    }
}

/// Classification of a source entry, computed once per transfer so the
/// decision never re-queries the filesystem mid-dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real directory, not reached through a symlink.
    Directory,
    /// A symbolic link whose target is a directory.
    SymlinkedDirectory,
    /// Everything else: regular files, non-directory symlinks, special files.
    Other,
}

impl EntryKind {
    /// Stat `src` without following links, then follow the link a single time
    /// to decide whether a symlink points at a directory. A dangling symlink
    /// classifies as `Other`.
    pub fn classify(src: &Path) -> Result<Self> {
        let lmeta = fs::symlink_metadata(src).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                anyhow::Error::new(TransferError::SourceNotFound(src.to_path_buf()))
            } else {
                anyhow::Error::new(e).context(format!("stat '{}'", src.display()))
            }
        })?;

        let ftype = lmeta.file_type();
        if ftype.is_dir() {
            return Ok(EntryKind::Directory);
        }
        if ftype.is_symlink() && fs::metadata(src).map(|m| m.is_dir()).unwrap_or(false) {
            return Ok(EntryKind::SymlinkedDirectory);
        }
        Ok(EntryKind::Other)
    }
}

/// Transfer one filesystem entry from `src` to `dest`, preserving its kind
/// and metadata.
///
/// The destination's parent directory is created first if missing (with all
/// ancestors). Directories are created empty; the caller's tree walk is
/// responsible for populating children through further calls. Symlinked
/// directories are recreated as symlinks, never hardlinked: a hardlinked link
/// shares its backing store with the source tree, and cleaning up a temporary
/// source would gut the staged destination.
pub fn transfer_entry(opts: &TransferOptions, src: &Path, dest: &Path) -> Result<()> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => return Err(TransferError::NoParent(dest.to_path_buf()).into()),
    };
    if !parent.is_dir() {
        fs::create_dir_all(parent)
            .map_err(io_error_with_help("create destination directory", parent))?;
    }

    match EntryKind::classify(src)? {
        EntryKind::Directory => {
            debug!(directory = %dest.display(), "Creating");
            if !dest.is_dir() {
                fs::create_dir(dest).map_err(io_error_with_help("create directory", dest))?;
            }
        }
        EntryKind::SymlinkedDirectory => {
            debug!(
                source = %src.display(),
                destination = %dest.display(),
                "Copying symlinked directory"
            );
            copy_structure(src, dest)?;
        }
        EntryKind::Other => {
            if opts.hardlink {
                debug!(source = %src.display(), destination = %dest.display(), "Linking");
                match try_hard_link(src, dest)
                    .map_err(io_error_with_help("hardlink entry", dest))?
                {
                    LinkOutcome::Linked => {}
                    LinkOutcome::Unsupported(reason) => {
                        debug!(
                            source = %src.display(),
                            destination = %dest.display(),
                            reason = %reason,
                            "Copying"
                        );
                        copy_structure(src, dest)?;
                    }
                }
            } else {
                debug!(source = %src.display(), destination = %dest.display(), "Copying");
                copy_structure(src, dest)?;
            }
        }
    }

    copy_metadata(src, dest)
}
