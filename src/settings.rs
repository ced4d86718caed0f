//! Export settings
//!
//! Every field has a default, so a settings file only needs to name what
//! it changes. Settings load from YAML or JSON.

use serde::{Deserialize, Serialize};

/// Rescales source ticks into blueprint game ticks
pub const DEFAULT_TIME_MULTIPLIER: u32 = 5;

/// Item signal the speakers' trigger condition compares against
pub const DEFAULT_COUNTER_SIGNAL: &str = "coal";

/// How the playback script normalizes source keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchPolicy {
    /// `(key - 33 + 24) mod 24`, always within `[0, 24)`
    #[default]
    Wrapped,
    /// `key - 33`, no wraparound
    Shifted,
}

impl PitchPolicy {
    /// Lowest key of the canonical note-block range (F#3)
    pub const BASE_KEY: i32 = 33;
    /// Width of the wrapped pitch window in semitones
    pub const WINDOW: i32 = 24;

    pub fn normalize(self, key: i32) -> i32 {
        match self {
            PitchPolicy::Wrapped => (key - Self::BASE_KEY + Self::WINDOW).rem_euclid(Self::WINDOW),
            PitchPolicy::Shifted => key - Self::BASE_KEY,
        }
    }
}

/// Circuit wire color used for every connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireColor {
    #[default]
    Red,
    Green,
}

impl WireColor {
    pub fn as_str(self) -> &'static str {
        match self {
            WireColor::Red => "red",
            WireColor::Green => "green",
        }
    }
}

/// Per-speaker playback parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeakerParameters {
    pub volume: f64,
    pub play_globally: bool,
    pub allow_polyphony: bool,
}

impl Default for SpeakerParameters {
    fn default() -> Self {
        Self {
            volume: 1.0,
            play_globally: true,
            allow_polyphony: true,
        }
    }
}

/// Which pipelines a conversion runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputTargets {
    pub script: bool,
    pub blueprint: bool,
}

impl Default for OutputTargets {
    fn default() -> Self {
        Self {
            script: true,
            blueprint: true,
        }
    }
}

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Source tick to game tick factor for trigger values
    pub time_multiplier: u32,
    /// Key normalization for the playback script
    pub pitch_policy: PitchPolicy,
    pub wire_color: WireColor,
    pub counter_signal: String,
    pub speaker: SpeakerParameters,
    pub targets: OutputTargets,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            time_multiplier: DEFAULT_TIME_MULTIPLIER,
            pitch_policy: PitchPolicy::default(),
            wire_color: WireColor::default(),
            counter_signal: DEFAULT_COUNTER_SIGNAL.to_string(),
            speaker: SpeakerParameters::default(),
            targets: OutputTargets::default(),
        }
    }
}

impl ExportSettings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
