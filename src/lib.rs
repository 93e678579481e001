//! Core library for `stagelink`.
//!
//! Transfers a single filesystem entry (regular file, directory, or symlink)
//! into a package staging tree, preserving its kind and metadata. File data is
//! hardlinked when the filesystem allows it and copied otherwise; symlinked
//! directories are recreated as symlinks so the staged tree never shares a
//! backing store with a temporary source tree.
//!
//! The crate deliberately does not walk directory trees: the enclosing
//! packaging tool drives the walk and calls [`transfer_entry`] once per entry.

pub mod errors;
pub mod fs_ops;

pub use errors::TransferError;
pub use fs_ops::{EntryKind, LinkOutcome, TransferOptions, transfer_entry};
