use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors. None of these are retried: any one of them aborts
/// the current batch, leaving whatever the checkpoint already holds on disk.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The reference dex could not supply the data translation depends on.
    #[error("reference data unavailable: {0}")]
    ReferenceData(String),

    /// A species record carried no national dex entry, so the record cannot
    /// be identified.
    #[error("failed to find national pokedex number for {0}")]
    UnresolvedIdentity(String),

    /// A pipeline step needed a checkpoint that was never written.
    #[error("checkpoint file missing: {}", .0.display())]
    MissingCheckpoint(PathBuf),
}
