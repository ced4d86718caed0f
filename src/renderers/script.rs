//! Playback script renderer
//!
//! Produces a nested table literal consumed by a tick-driven playback loop:
//!
//! ```text
//! {timing=0.1,notes={{{diff=4,inst='harp',key=6},},{{diff=1,inst='bass',key=12},},}}
//! ```
//!
//! `timing` is seconds per tick. Each inner table is one chord; every entry
//! carries the wait until the next chord, so the loop plays a whole chord
//! and then sleeps `diff` ticks.

use std::fmt;

use crate::converters::diff_encode;
use crate::errors::{ConversionError, Result};
use crate::models::Song;
use crate::settings::PitchPolicy;

/// One note of the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEvent {
    pub inter_tick_delta: u32,
    pub instrument_name: &'static str,
    pub key: i32,
}

/// Script model prior to text rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackScript {
    /// Seconds per tick
    pub timing: f64,
    /// Events grouped by originating chord
    pub groups: Vec<Vec<ScriptEvent>>,
}

impl PlaybackScript {
    pub fn event_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

impl fmt::Display for PlaybackScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{timing={},notes={{", self.timing)?;
        for group in &self.groups {
            f.write_str("{")?;
            for event in group {
                write!(
                    f,
                    "{{diff={},inst='{}',key={}}},",
                    event.inter_tick_delta, event.instrument_name, event.key
                )?;
            }
            f.write_str("},")?;
        }
        f.write_str("}}")
    }
}

/// Build the script model for a song
pub fn build_script(song: &Song, pitch_policy: PitchPolicy) -> Result<PlaybackScript> {
    if song.groups().is_empty() {
        return Err(ConversionError::EmptySong);
    }

    let mut groups = Vec::with_capacity(song.groups().len());
    for timed in diff_encode(song.groups()) {
        let timed = timed?;
        let events = timed
            .group
            .notes()
            .iter()
            .map(|note| -> Result<ScriptEvent> {
                Ok(ScriptEvent {
                    inter_tick_delta: timed.delta,
                    instrument_name: note.source_instrument()?.name(),
                    key: pitch_policy.normalize(note.key),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        groups.push(events);
    }

    Ok(PlaybackScript {
        timing: song.seconds_per_tick(),
        groups,
    })
}

/// Render a song straight to script text
pub fn render_script(song: &Song, pitch_policy: PitchPolicy) -> Result<String> {
    let script = build_script(song, pitch_policy)?;
    log::debug!(
        "rendered script: {} groups, {} events",
        script.groups.len(),
        script.event_count()
    );
    Ok(script.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteGroup};

    fn two_note_song() -> Song {
        Song::new(
            10.0,
            5,
            vec![
                NoteGroup::new(vec![Note::new(0, 0, 39)]).unwrap(),
                NoteGroup::new(vec![Note::new(4, 1, 45)]).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_two_note_song_text() {
        let text = render_script(&two_note_song(), PitchPolicy::Wrapped).unwrap();
        assert_eq!(
            text,
            "{timing=0.1,notes={{{diff=4,inst='harp',key=6},},{{diff=1,inst='bass',key=12},},}}"
        );
    }

    #[test]
    fn test_chord_entries_share_delta() {
        let song = Song::new(
            20.0,
            10,
            vec![
                NoteGroup::new(vec![Note::new(2, 0, 40), Note::new(2, 4, 41), Note::new(2, 15, 42)]).unwrap(),
                NoteGroup::new(vec![Note::new(9, 6, 50)]).unwrap(),
            ],
        )
        .unwrap();
        let script = build_script(&song, PitchPolicy::Wrapped).unwrap();
        assert_eq!(script.groups.len(), 2);
        assert!(script.groups[0].iter().all(|e| e.inter_tick_delta == 7));
        let names: Vec<&str> = script.groups[0].iter().map(|e| e.instrument_name).collect();
        assert_eq!(names, vec!["harp", "hat", "pling"]);
        assert_eq!(script.groups[1][0].inter_tick_delta, 1);
        assert_eq!(script.timing, 0.05);
    }

    #[test]
    fn test_shifted_policy_does_not_wrap() {
        let song = Song::new(10.0, 1, vec![NoteGroup::new(vec![Note::new(0, 0, 60)]).unwrap()]).unwrap();
        let script = build_script(&song, PitchPolicy::Shifted).unwrap();
        assert_eq!(script.groups[0][0].key, 27);
        let wrapped = build_script(&song, PitchPolicy::Wrapped).unwrap();
        assert_eq!(wrapped.groups[0][0].key, 3);
    }

    #[test]
    fn test_empty_song_is_error() {
        let song = Song::new(10.0, 0, vec![]).unwrap();
        assert!(matches!(
            build_script(&song, PitchPolicy::Wrapped),
            Err(ConversionError::EmptySong)
        ));
    }

    #[test]
    fn test_unmapped_instrument_aborts_script() {
        let song = Song::new(
            10.0,
            3,
            vec![
                NoteGroup::new(vec![Note::new(0, 0, 39)]).unwrap(),
                NoteGroup::new(vec![Note::new(2, 16, 39)]).unwrap(),
            ],
        )
        .unwrap();
        assert!(matches!(
            render_script(&song, PitchPolicy::Wrapped),
            Err(ConversionError::UnmappedInstrument { index: 16 })
        ));
    }
}
