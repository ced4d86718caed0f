//! Error types for song conversion
//!
//! Every per-song failure is a `ConversionError`. The batch runner catches
//! these at the job boundary, so one bad song never aborts the rest.

use thiserror::Error;

/// Failures while turning raw input into a `Song`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Input is not a readable decoded-song document
    #[error("malformed song document: {0}")]
    Json(String),

    /// Tempo must be a finite, positive ticks-per-second factor
    #[error("invalid tempo: {0}")]
    InvalidTempo(f64),

    /// Structurally impossible note stream (e.g. ticks running backwards)
    #[error("invalid note stream: {0}")]
    Invalid(String),
}

/// Top-level conversion error type
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Source song is malformed or unreadable
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Raw source instrument index outside the known instrument set
    #[error("instrument index {index} has no mapping")]
    UnmappedInstrument { index: i32 },

    /// Song contains no non-empty note group
    #[error("song has no notes")]
    EmptySong,

    /// Blueprint document could not be serialized
    #[error("blueprint serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Blueprint payload could not be compressed
    #[error("blueprint compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// Manifest could not be persisted
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
