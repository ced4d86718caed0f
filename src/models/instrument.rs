//! Instrument taxonomies and the mapping between them
//!
//! Source songs use the 16 note-block instruments. The speaker blueprint
//! uses the 12 programmable-speaker instruments. Three percussive source
//! instruments (snare, hat, cow bell) do not map through the table: they
//! become fixed drum-kit samples regardless of the note's own key.

use crate::errors::ConversionError;

/// Offset from a source key to a speaker note index for melodic instruments
pub const SPEAKER_KEY_OFFSET: i32 = 24;

/// Note-block instrument, by its on-disk ordinal
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum SourceInstrument {
    Harp = 0,
    Bass = 1,
    BaseDrum = 2,
    Snare = 3,
    Hat = 4,
    Guitar = 5,
    Flute = 6,
    Bell = 7,
    Chime = 8,
    Xylophone = 9,
    IronXylophone = 10,
    CowBell = 11,
    Didgeridoo = 12,
    Bit = 13,
    Banjo = 14,
    Pling = 15,
}

impl SourceInstrument {
    pub const ALL: [SourceInstrument; 16] = [
        SourceInstrument::Harp,
        SourceInstrument::Bass,
        SourceInstrument::BaseDrum,
        SourceInstrument::Snare,
        SourceInstrument::Hat,
        SourceInstrument::Guitar,
        SourceInstrument::Flute,
        SourceInstrument::Bell,
        SourceInstrument::Chime,
        SourceInstrument::Xylophone,
        SourceInstrument::IronXylophone,
        SourceInstrument::CowBell,
        SourceInstrument::Didgeridoo,
        SourceInstrument::Bit,
        SourceInstrument::Banjo,
        SourceInstrument::Pling,
    ];

    /// Look up an instrument by raw index, failing loudly when out of range
    pub fn from_index(index: i32) -> Result<Self, ConversionError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
            .ok_or(ConversionError::UnmappedInstrument { index })
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Name used by the playback script
    pub fn name(self) -> &'static str {
        match self {
            SourceInstrument::Harp => "harp",
            SourceInstrument::Bass => "bass",
            SourceInstrument::BaseDrum => "basedrum",
            SourceInstrument::Snare => "snare",
            SourceInstrument::Hat => "hat",
            SourceInstrument::Guitar => "guitar",
            SourceInstrument::Flute => "flute",
            SourceInstrument::Bell => "bell",
            SourceInstrument::Chime => "chime",
            SourceInstrument::Xylophone => "xylophone",
            SourceInstrument::IronXylophone => "iron_xylophone",
            SourceInstrument::CowBell => "cow_bell",
            SourceInstrument::Didgeridoo => "didgeridoo",
            SourceInstrument::Bit => "bit",
            SourceInstrument::Banjo => "banjo",
            SourceInstrument::Pling => "pling",
        }
    }

    /// How this instrument reaches the speaker domain
    pub fn mapping(self) -> InstrumentMapping {
        use InstrumentMapping::{Melodic, Percussive};
        match self {
            SourceInstrument::Harp => Melodic(TargetInstrument::Piano),
            SourceInstrument::Bass => Melodic(TargetInstrument::Bass),
            SourceInstrument::BaseDrum => Melodic(TargetInstrument::Bass),
            SourceInstrument::Snare => Percussive(4),
            SourceInstrument::Hat => Percussive(5),
            SourceInstrument::Guitar => Melodic(TargetInstrument::PluckedStrings),
            SourceInstrument::Flute => Melodic(TargetInstrument::Celesta),
            SourceInstrument::Bell => Melodic(TargetInstrument::Vibraphone),
            SourceInstrument::Chime => Melodic(TargetInstrument::SteelDrum),
            SourceInstrument::Xylophone => Melodic(TargetInstrument::Piano),
            SourceInstrument::IronXylophone => Melodic(TargetInstrument::Piano),
            SourceInstrument::CowBell => Percussive(15),
            SourceInstrument::Didgeridoo => Melodic(TargetInstrument::Square),
            SourceInstrument::Bit => Melodic(TargetInstrument::Sawtooth),
            SourceInstrument::Banjo => Melodic(TargetInstrument::PluckedStrings),
            SourceInstrument::Pling => Melodic(TargetInstrument::SteelDrum),
        }
    }

    /// Table mapping for melodic instruments; `None` for the percussive ones
    pub fn target_instrument(self) -> Option<TargetInstrument> {
        match self.mapping() {
            InstrumentMapping::Melodic(target) => Some(target),
            InstrumentMapping::Percussive(_) => None,
        }
    }

    /// Fixed drum-kit note for the percussive special cases
    pub fn percussion_note(self) -> Option<i32> {
        match self.mapping() {
            InstrumentMapping::Percussive(note) => Some(note),
            InstrumentMapping::Melodic(_) => None,
        }
    }

    /// Resolve the speaker instrument and note index for a note of this instrument
    pub fn speaker_voice(self, key: i32) -> SpeakerVoice {
        match self.mapping() {
            InstrumentMapping::Melodic(instrument) => SpeakerVoice {
                instrument,
                note: key - SPEAKER_KEY_OFFSET,
            },
            InstrumentMapping::Percussive(note) => SpeakerVoice {
                instrument: TargetInstrument::DrumKit,
                note,
            },
        }
    }
}

/// Route from a source instrument into the speaker domain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrumentMapping {
    /// Mapped through the instrument table; the note's key picks the pitch
    Melodic(TargetInstrument),
    /// Drum-kit sample at a fixed note index
    Percussive(i32),
}

impl TryFrom<i32> for SourceInstrument {
    type Error = ConversionError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

/// Programmable-speaker instrument; the ordinal is the blueprint's `instrument_id`
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum TargetInstrument {
    Alarms = 0,
    Miscellaneous = 1,
    DrumKit = 2,
    Piano = 3,
    Bass = 4,
    Lead = 5,
    Sawtooth = 6,
    Square = 7,
    Celesta = 8,
    Vibraphone = 9,
    PluckedStrings = 10,
    SteelDrum = 11,
}

/// Resolved speaker playback parameters for one note
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeakerVoice {
    pub instrument: TargetInstrument,
    pub note: i32,
}
