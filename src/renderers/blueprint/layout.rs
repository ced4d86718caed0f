//! Grid layout planning
//!
//! Every note becomes one speaker on a 2-D grid. Placement follows a single
//! cursor that only moves forward: left to right, skipping spacer columns,
//! wrapping to a new row once past the row width. The cursor lives in a
//! `LayoutContext` owned by one planner, so each song starts at `(0, 0)`.

use super::defaults::{row_width, SPACER_INTERVAL, TRIGGER_OFFSET};
use crate::errors::Result;
use crate::models::{Note, TargetInstrument};

/// Integer grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    pub const ORIGIN: GridPosition = GridPosition { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn is_row_start(&self) -> bool {
        self.x == 0
    }
}

/// A speaker placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedEntity {
    pub position: GridPosition,
    pub instrument: TargetInstrument,
    pub note: i32,
    /// Counter value on which the speaker fires
    pub trigger_value: u64,
}

/// Placement cursor for one song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    cursor: GridPosition,
    row_width: u32,
}

impl LayoutContext {
    pub fn new(song_length: u32) -> Self {
        Self {
            cursor: GridPosition::ORIGIN,
            row_width: row_width(song_length),
        }
    }

    pub fn cursor(&self) -> GridPosition {
        self.cursor
    }

    pub fn row_width(&self) -> u32 {
        self.row_width
    }

    /// Hand out the current cell and advance past it
    pub fn next_cell(&mut self) -> GridPosition {
        let cell = self.cursor;

        self.cursor.x += 1;
        if self.cursor.x % SPACER_INTERVAL == 0 {
            self.cursor.x += 1;
        }
        if self.cursor.x > self.row_width {
            self.cursor.x = 0;
            self.cursor.y += 1;
            log::debug!("layout wrapped to row {}", self.cursor.y);
        }

        cell
    }
}

/// Places notes for one conversion job
#[derive(Debug, Clone)]
pub struct GridLayoutPlanner {
    context: LayoutContext,
    time_multiplier: u32,
}

impl GridLayoutPlanner {
    pub fn new(song_length: u32, time_multiplier: u32) -> Self {
        Self {
            context: LayoutContext::new(song_length),
            time_multiplier,
        }
    }

    pub fn context(&self) -> &LayoutContext {
        &self.context
    }

    /// Trigger value for a source tick
    pub fn trigger_value(&self, tick: u32) -> u64 {
        tick as u64 * self.time_multiplier as u64 + TRIGGER_OFFSET
    }

    /// Map and place one note; an unmapped instrument leaves the cursor untouched
    pub fn place(&mut self, note: &Note) -> Result<PlacedEntity> {
        let voice = note.source_instrument()?.speaker_voice(note.key);
        Ok(PlacedEntity {
            position: self.context.next_cell(),
            instrument: voice.instrument,
            note: voice.note,
            trigger_value: self.trigger_value(note.tick),
        })
    }
}

/// Place every note of a stream, in order
pub fn plan_layout<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
    song_length: u32,
    time_multiplier: u32,
) -> Result<Vec<PlacedEntity>> {
    let mut planner = GridLayoutPlanner::new(song_length, time_multiplier);
    notes.into_iter().map(|note| planner.place(note)).collect()
}
