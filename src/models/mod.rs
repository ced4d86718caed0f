//! Data model for decoded songs and the two instrument taxonomies

pub mod instrument;
pub mod song;

// Re-export commonly used types
pub use instrument::{InstrumentMapping, SourceInstrument, SpeakerVoice, TargetInstrument, SPEAKER_KEY_OFFSET};
pub use song::{Note, NoteGroup, Song};
