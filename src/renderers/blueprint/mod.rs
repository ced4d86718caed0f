//! Speaker blueprint renderer
//!
//! Turns every note into a programmable speaker whose enable condition
//! fires when a shared counter reaches the note's scaled tick. Timing is
//! carried entirely by the trigger values; placement only has to keep the
//! wiring short and the footprint roughly square.
//!
//! # Pipeline
//! 1. **Layout**: `GridLayoutPlanner` assigns each note a grid cell
//! 2. **Wiring**: `CircuitWirer` chains speakers and anchors row starts
//! 3. **Encode**: `encode_blueprint` produces the import string
//!
//! ```rust,ignore
//! use nbs_export::renderers::blueprint::render_blueprint;
//!
//! let blueprint = render_blueprint(&song, &ExportSettings::default())?;
//! ```

pub mod defaults;
pub mod encoder;
pub mod layout;
pub mod wiring;

pub use encoder::{blueprint_json, decode_blueprint, encode_blueprint, encode_blueprint_json};
pub use layout::{plan_layout, GridLayoutPlanner, GridPosition, LayoutContext, PlacedEntity};
pub use wiring::{wire_entities, CircuitWirer, Connection, ConnectionKind, WiredLayout};

use crate::errors::{ConversionError, Result};
use crate::models::Song;
use crate::settings::ExportSettings;

/// Place and wire every note of a song
pub fn build_wired_layout(song: &Song, settings: &ExportSettings) -> Result<WiredLayout> {
    if song.groups().is_empty() {
        return Err(ConversionError::EmptySong);
    }

    let mut planner = GridLayoutPlanner::new(song.length, settings.time_multiplier);
    let mut wirer = CircuitWirer::new(settings.wire_color);
    for note in song.notes() {
        wirer.add(planner.place(note)?);
    }

    let layout = wirer.finish();
    log::debug!(
        "laid out {} speakers over {} rows (row width {})",
        layout.entities.len(),
        planner.context().cursor().y + 1,
        planner.context().row_width()
    );
    Ok(layout)
}

/// Render a song to a blueprint import string
pub fn render_blueprint(song: &Song, settings: &ExportSettings) -> Result<String> {
    let layout = build_wired_layout(song, settings)?;
    encode_blueprint(&layout, settings)
}
