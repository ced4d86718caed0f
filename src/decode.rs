//! Song decoding boundary
//!
//! The binary song reader lives outside this crate. Whatever performs that
//! step plugs in through `SongDecoder`. `JsonSongDecoder` accepts the
//! decoded-song document such a reader emits:
//!
//! ```json
//! { "Tempo": 10, "Length": 5, "SongAuthor": "", "OriginalAuthor": "",
//!   "Notes": [[{"Tick":0,"Layer":0,"Inst":0,"Key":39,"Velocity":100,"Panning":100,"Pitch":0}]] }
//! ```
//!
//! `Notes` may be either a list of per-tick groups or one flat note list.

use serde::Deserialize;

use crate::converters::{collect_groups, group_flat_notes};
use crate::errors::DecodeError;
use crate::models::{Note, Song};

/// Turns raw song bytes into a `Song`
pub trait SongDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Song, DecodeError>;
}

impl<F> SongDecoder for F
where
    F: Fn(&[u8]) -> Result<Song, DecodeError>,
{
    fn decode(&self, bytes: &[u8]) -> Result<Song, DecodeError> {
        self(bytes)
    }
}

/// Decoder for the JSON decoded-song document
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSongDecoder;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNotes {
    Grouped(Vec<Vec<Note>>),
    Flat(Vec<Note>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawSong {
    tempo: f64,
    length: u32,
    #[serde(default)]
    song_author: String,
    #[serde(default)]
    original_author: String,
    notes: RawNotes,
}

impl SongDecoder for JsonSongDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Song, DecodeError> {
        let raw: RawSong = serde_json::from_slice(bytes).map_err(|e| DecodeError::Json(e.to_string()))?;

        let groups = match raw.notes {
            RawNotes::Grouped(groups) => collect_groups(groups)?,
            RawNotes::Flat(notes) => group_flat_notes(&notes)?,
        };

        Ok(Song::new(raw.tempo, raw.length, groups)?.with_authors(raw.song_author, raw.original_author))
    }
}
