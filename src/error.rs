// File: src/error.rs
use thiserror::Error;

/// Everything that can go wrong while loading a word graph or building a passphrase.
///
/// A failed bigram link is deliberately absent: it is a counted, tolerated
/// condition reported on [`crate::core::generator::Passphrase`].
#[derive(Debug, Error)]
pub enum PhraseError {
    /// The corpus (or a snapshot of it) violates the structural format.
    #[error("corrupted wordgraph file: {0}")]
    CorpusCorrupt(String),

    /// An adjacency string could not be decoded.
    #[error("malformed follower encoding at byte {offset}: {reason}")]
    DecodeFault { offset: usize, reason: &'static str },

    /// The secure random source failed or came up short.
    #[error("unable to read random numbers: {0}")]
    RandomSourceFault(String),

    /// An index fell outside a sequence's populated range.
    #[error("invalid index {index} not in [0, {len})")]
    IndexFault { index: usize, len: usize },

    /// A requested chain length is too long to sample.
    #[error("chain length {length} exceeds {max}")]
    InvalidLength { length: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl PhraseError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        PhraseError::CorpusCorrupt(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, PhraseError>;
