//! Decoded song representation
//!
//! A `Song` is produced once per conversion job and is read-only afterwards.
//! Its note groups are always non-empty and ordered by tick.

use serde::{Deserialize, Serialize};

use crate::errors::{DecodeError, Result};
use crate::models::instrument::SourceInstrument;

/// One note as emitted by the external song decoder
///
/// Field names follow the decoder's output (`Tick`, `Inst`, `Key`, ...).
/// The instrument stays a raw, signed index until a renderer maps it, so an
/// out-of-range value (negative or past the table) is reported where it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "Tick")]
    pub tick: u32,
    #[serde(rename = "Layer", default)]
    pub layer: i32,
    #[serde(rename = "Inst")]
    pub instrument: i32,
    #[serde(rename = "Key")]
    pub key: i32,
    #[serde(rename = "Velocity", default)]
    pub velocity: i32,
    #[serde(rename = "Panning", default)]
    pub panning: i32,
    #[serde(rename = "Pitch", default)]
    pub pitch: i32,
}

impl Note {
    /// Minimal note for the common case where only timing, instrument and key matter
    pub fn new(tick: u32, instrument: i32, key: i32) -> Self {
        Self {
            tick,
            layer: 0,
            instrument,
            key,
            velocity: 100,
            panning: 100,
            pitch: 0,
        }
    }

    pub fn source_instrument(&self) -> Result<SourceInstrument> {
        SourceInstrument::from_index(self.instrument)
    }
}

/// Notes sharing one tick (a chord), in original stream order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteGroup {
    notes: Vec<Note>,
}

impl NoteGroup {
    /// Wrap a chord; every note must sit on the same tick
    pub fn new(notes: Vec<Note>) -> std::result::Result<Self, DecodeError> {
        let Some(first) = notes.first() else {
            return Err(DecodeError::Invalid("empty note group".to_string()));
        };
        if let Some(stray) = notes.iter().find(|n| n.tick != first.tick) {
            return Err(DecodeError::Invalid(format!(
                "note at tick {} grouped with tick {}",
                stray.tick, first.tick
            )));
        }
        Ok(Self { notes })
    }

    /// Tick of the group's first note
    pub fn tick(&self) -> u32 {
        self.notes[0].tick
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Append a note already known to share the group's tick
    pub(crate) fn push(&mut self, note: Note) {
        debug_assert_eq!(note.tick, self.tick());
        self.notes.push(note);
    }
}

/// Groups must start on strictly increasing ticks
pub(crate) fn ensure_ascending(groups: &[NoteGroup]) -> std::result::Result<(), DecodeError> {
    match groups.windows(2).find(|pair| pair[1].tick() <= pair[0].tick()) {
        Some(pair) => Err(DecodeError::Invalid(format!(
            "group at tick {} follows group at tick {}",
            pair[1].tick(),
            pair[0].tick()
        ))),
        None => Ok(()),
    }
}

/// A fully decoded song
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// Ticks per second
    pub tempo: f64,
    /// Total tick count
    pub length: u32,
    pub author: String,
    pub original_author: String,
    groups: Vec<NoteGroup>,
}

impl Song {
    /// Assemble a song, rejecting an unusable tempo or out-of-order groups
    pub fn new(tempo: f64, length: u32, groups: Vec<NoteGroup>) -> std::result::Result<Self, DecodeError> {
        if !tempo.is_finite() || tempo <= 0.0 {
            return Err(DecodeError::InvalidTempo(tempo));
        }
        ensure_ascending(&groups)?;

        Ok(Self {
            tempo,
            length,
            author: String::new(),
            original_author: String::new(),
            groups,
        })
    }

    /// Attach author metadata
    pub fn with_authors(mut self, author: impl Into<String>, original_author: impl Into<String>) -> Self {
        self.author = author.into();
        self.original_author = original_author.into();
        self
    }

    pub fn groups(&self) -> &[NoteGroup] {
        &self.groups
    }

    /// Every note in stream order, flattened across groups
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.groups.iter().flat_map(|g| g.notes().iter())
    }

    pub fn note_count(&self) -> usize {
        self.groups.iter().map(NoteGroup::len).sum()
    }

    /// Seconds per tick, as written into the playback script
    pub fn seconds_per_tick(&self) -> f64 {
        1.0 / self.tempo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_is_rejected() {
        assert!(matches!(NoteGroup::new(vec![]), Err(DecodeError::Invalid(_))));
        let group = NoteGroup::new(vec![Note::new(3, 0, 40)]).unwrap();
        assert_eq!(group.tick(), 3);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_group_rejects_mixed_ticks() {
        let result = NoteGroup::new(vec![Note::new(0, 0, 39), Note::new(7, 1, 40)]);
        assert!(matches!(result, Err(DecodeError::Invalid(_))));
    }

    #[test]
    fn test_song_rejects_bad_tempo() {
        for tempo in [0.0, -4.0, f64::NAN, f64::INFINITY] {
            let group = NoteGroup::new(vec![Note::new(0, 0, 39)]).unwrap();
            assert!(matches!(Song::new(tempo, 1, vec![group]), Err(DecodeError::InvalidTempo(_))));
        }
    }

    #[test]
    fn test_song_rejects_groups_out_of_order() {
        let backwards = vec![
            NoteGroup::new(vec![Note::new(9, 0, 39)]).unwrap(),
            NoteGroup::new(vec![Note::new(2, 0, 40)]).unwrap(),
        ];
        assert!(matches!(Song::new(10.0, 10, backwards), Err(DecodeError::Invalid(_))));

        let repeated = vec![
            NoteGroup::new(vec![Note::new(4, 0, 39)]).unwrap(),
            NoteGroup::new(vec![Note::new(4, 1, 40)]).unwrap(),
        ];
        assert!(Song::new(10.0, 10, repeated).is_err());
    }

    #[test]
    fn test_song_accepts_no_groups() {
        let song = Song::new(10.0, 0, vec![]).unwrap();
        assert_eq!(song.note_count(), 0);
    }

    #[test]
    fn test_song_flattens_notes_in_order() {
        let song = Song::new(
            10.0,
            8,
            vec![
                NoteGroup::new(vec![Note::new(0, 0, 39), Note::new(0, 1, 40)]).unwrap(),
                NoteGroup::new(vec![Note::new(4, 2, 41)]).unwrap(),
            ],
        )
        .unwrap();
        let keys: Vec<i32> = song.notes().map(|n| n.key).collect();
        assert_eq!(keys, vec![39, 40, 41]);
        assert_eq!(song.note_count(), 3);
        assert_eq!(song.seconds_per_tick(), 0.1);
    }

    #[test]
    fn test_out_of_range_instrument_still_deserializes() {
        let high: Note = serde_json::from_str(r#"{"Tick":0,"Inst":300,"Key":45}"#).unwrap();
        assert_eq!(high.instrument, 300);
        let negative: Note = serde_json::from_str(r#"{"Tick":0,"Inst":-1,"Key":45}"#).unwrap();
        assert_eq!(negative.instrument, -1);
    }

    #[test]
    fn test_note_deserializes_decoder_field_names() {
        let note: Note = serde_json::from_str(
            r#"{"Tick":4,"Layer":1,"Inst":1,"Key":45,"Velocity":100,"Panning":100,"Pitch":0}"#,
        )
        .unwrap();
        assert_eq!(note.tick, 4);
        assert_eq!(note.instrument, 1);
        assert_eq!(note.key, 45);
        assert_eq!(note.source_instrument().unwrap(), SourceInstrument::Bass);
    }
}
