//! Typed error definitions for stagelink.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Destination has no parent directory: {0}")]
    NoParent(PathBuf),
}
