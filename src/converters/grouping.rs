//! Tick grouping
//!
//! Partitions a note stream into chords. Input is assumed tick-monotonic;
//! nothing is re-sorted. A stream whose ticks run backwards is reported as
//! malformed rather than corrected.

use crate::errors::DecodeError;
use crate::models::song::ensure_ascending;
use crate::models::{Note, NoteGroup};

/// Group a flat note stream by consecutive equal ticks
///
/// Single pass with a running current-tick marker: a note whose tick
/// matches the marker joins the open group, any later tick closes it.
pub fn group_flat_notes(notes: &[Note]) -> Result<Vec<NoteGroup>, DecodeError> {
    let mut groups: Vec<NoteGroup> = Vec::new();
    let mut current_tick: Option<u32> = None;

    for note in notes {
        match current_tick {
            Some(tick) if note.tick == tick => {
                if let Some(group) = groups.last_mut() {
                    group.push(*note);
                }
            }
            Some(tick) if note.tick < tick => {
                return Err(DecodeError::Invalid(format!(
                    "tick {} follows tick {}",
                    note.tick, tick
                )));
            }
            _ => {
                groups.push(NoteGroup::new(vec![*note])?);
                current_tick = Some(note.tick);
            }
        }
    }

    Ok(groups)
}

/// Normalize decoder-built groups: drop empty ones, keep order
///
/// Every note in a group must share the group's tick, and groups must not
/// go back in time.
pub fn collect_groups(raw: Vec<Vec<Note>>) -> Result<Vec<NoteGroup>, DecodeError> {
    let groups = raw
        .into_iter()
        .filter(|notes| !notes.is_empty())
        .map(NoteGroup::new)
        .collect::<Result<Vec<_>, _>>()?;
    ensure_ascending(&groups)?;
    Ok(groups)
}
