//! Output renderers
//!
//! Two independent outputs are produced from a decoded song:
//! - `script`: diff-encoded playback table text
//! - `blueprint`: circuit-wired speaker layout as an import string
//!
//! They share only the song and the instrument tables.

pub mod blueprint;
pub mod script;

// Re-export main entry points
pub use blueprint::render_blueprint;
pub use script::{build_script, render_script, PlaybackScript, ScriptEvent};
