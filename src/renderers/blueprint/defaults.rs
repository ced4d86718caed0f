//! Constants for speaker blueprint export

/// Every Nth grid column is left empty as a spacer
pub const SPACER_INTERVAL: u32 = 6;

/// Added to the scaled tick so the trigger fires on the counter's next value
pub const TRIGGER_OFFSET: u64 = 1;

/// Prototype name of the placed entity
pub const SPEAKER_ENTITY: &str = "programmable-speaker";

/// Circuit connector id on the speaker
pub const CIRCUIT_CONNECTOR_ID: &str = "1";

/// Comparator of the speaker's enable condition
pub const TRIGGER_COMPARATOR: &str = "=";

/// Version byte prepended to the encoded blueprint string
pub const BLUEPRINT_FORMAT_VERSION: char = '0';

/// Pack a game version into the blueprint's 64-bit version field
pub const fn pack_game_version(major: u16, minor: u16, patch: u16, build: u16) -> u64 {
    ((major as u64) << 48) | ((minor as u64) << 32) | ((patch as u64) << 16) | build as u64
}

/// Game version stamped on exported blueprints (1.1.0.0)
pub const GAME_VERSION: u64 = pack_game_version(1, 1, 0, 0);

/// Row width for a song: round(sqrt(length)), giving a roughly square layout
pub fn row_width(song_length: u32) -> u32 {
    (song_length as f64).sqrt().round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_width() {
        assert_eq!(row_width(0), 0);
        assert_eq!(row_width(1), 1);
        assert_eq!(row_width(100), 10);
        assert_eq!(row_width(110), 10);
        // sqrt(111) = 10.54
        assert_eq!(row_width(111), 11);
    }

    #[test]
    fn test_game_version() {
        assert_eq!(GAME_VERSION, 281_479_271_677_952);
        assert_eq!(pack_game_version(0, 0, 0, 1), 1);
    }
}
