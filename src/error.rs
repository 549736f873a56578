//! Error taxonomy shared by the sequencing core.
//!
//! Nothing here is user-recoverable: wiring problems degrade to a warning and
//! a skipped phase, contract violations are handed back to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the tween, dialogue, cutscene and intro state machines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    /// The caller broke a call-site contract (bad choice index, bad duration).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An optional collaborator is not wired up; the phase is skipped.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    /// A one-shot sequence was started twice.
    #[error("sequence misuse: {0}")]
    SequenceMisuse(&'static str),
}

/// Failures while loading a dialogue script asset.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The script text is not valid RON for a script asset.
    #[error("failed to parse script: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The asset declares a format version this build does not understand.
    #[error("unsupported script version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version declared by the asset.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}
