//! Note Block song exporter
//!
//! Converts decoded note-block songs into two automation formats:
//! - a diff-encoded playback script for a tick-driven player loop
//! - a speaker blueprint whose placement, trigger values and circuit
//!   wiring encode playback timing and polyphony
//!
//! Both outputs are built from the same `Song` and share only the
//! instrument tables.

pub mod batch;
pub mod converters;
pub mod decode;
pub mod errors;
pub mod models;
pub mod renderers;
pub mod settings;

// Re-export commonly used types
pub use batch::{convert_batch, convert_song, BatchReport, JobOutcome, Manifest, ManifestEntry, SongInput, SongOutput};
pub use decode::{JsonSongDecoder, SongDecoder};
pub use errors::{ConversionError, DecodeError, Result};
pub use models::{Note, NoteGroup, Song, SourceInstrument, TargetInstrument};
pub use renderers::{render_blueprint, render_script};
pub use settings::{ExportSettings, PitchPolicy, WireColor};
