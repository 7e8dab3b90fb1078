//! Error types for the post-processor

use std::path::PathBuf;
use thiserror::Error;

/// Result type for post-processing passes
pub type Result<T> = std::result::Result<T, PostProcessError>;

/// Errors that abort a post-processing run
///
/// Per-file problems with manifests and sidecars are reported and skipped
/// inside the passes; only the variants below reach the caller.
#[derive(Error, Debug)]
pub enum PostProcessError {
    /// The OS refused to rename a field-map file
    #[error("Failed to rename {} -> {}: {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset traversal or configuration failure
    #[error(transparent)]
    Common(#[from] bidsprep_common::Error),
}
