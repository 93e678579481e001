//! Filesystem operations: modularized.

mod copy;
mod helpers;
mod link;
mod metadata;
mod transfer;

pub use copy::copy_structure;
pub use link::{LinkOutcome, try_hard_link};
pub use metadata::copy_metadata;
pub use transfer::{EntryKind, TransferOptions, transfer_entry};
