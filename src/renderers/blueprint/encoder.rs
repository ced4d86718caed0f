//! Blueprint string encoding
//!
//! Serializes wired speakers into the game's blueprint document and packs
//! it as a version byte followed by base64(zlib(json)).

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::Serialize;

use super::defaults::{
    BLUEPRINT_FORMAT_VERSION, CIRCUIT_CONNECTOR_ID, GAME_VERSION, SPEAKER_ENTITY, TRIGGER_COMPARATOR,
};
use super::wiring::WiredLayout;
use crate::errors::{ConversionError, DecodeError, Result};
use crate::models::TargetInstrument;
use crate::settings::ExportSettings;

#[derive(Debug, Serialize)]
struct BlueprintDocument<'a> {
    blueprint: Blueprint<'a>,
}

#[derive(Debug, Serialize)]
struct Blueprint<'a> {
    icons: Vec<Icon<'a>>,
    entities: Vec<EntityRecord<'a>>,
    item: &'static str,
    version: u64,
}

#[derive(Debug, Serialize)]
struct Icon<'a> {
    signal: SignalId<'a>,
    index: u32,
}

#[derive(Debug, Serialize)]
struct SignalId<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
}

impl<'a> SignalId<'a> {
    fn item(name: &'a str) -> Self {
        Self { kind: "item", name }
    }
}

#[derive(Debug, Serialize)]
struct Position {
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct EntityRecord<'a> {
    entity_number: usize,
    name: &'static str,
    position: Position,
    control_behavior: ControlBehavior<'a>,
    parameters: SpeakerRecord,
    alert_parameters: AlertParameters,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    connections: BTreeMap<&'static str, BTreeMap<&'static str, Vec<ConnectionTarget>>>,
}

#[derive(Debug, Serialize)]
struct ControlBehavior<'a> {
    circuit_condition: CircuitCondition<'a>,
    circuit_parameters: CircuitParameters,
}

#[derive(Debug, Serialize)]
struct CircuitCondition<'a> {
    first_signal: SignalId<'a>,
    constant: u64,
    comparator: &'static str,
}

#[derive(Debug, Serialize)]
struct CircuitParameters {
    signal_value_is_pitch: bool,
    instrument_id: TargetInstrument,
    note_id: i32,
}

#[derive(Debug, Serialize)]
struct SpeakerRecord {
    playback_volume: f64,
    playback_globally: bool,
    allow_polyphony: bool,
}

#[derive(Debug, Serialize)]
struct AlertParameters {
    show_alert: bool,
    show_on_map: bool,
    alert_message: &'static str,
}

#[derive(Debug, Serialize)]
struct ConnectionTarget {
    entity_id: usize,
}

/// Build the blueprint JSON document for a wired layout
pub fn blueprint_json(layout: &WiredLayout, settings: &ExportSettings) -> Result<String> {
    // Wires are listed on both endpoints under their own color; entity numbers are 1-based
    let mut wired_to: Vec<BTreeMap<&'static str, BTreeSet<usize>>> =
        vec![BTreeMap::new(); layout.entities.len()];
    for connection in &layout.connections {
        let color = connection.color.as_str();
        wired_to[connection.from]
            .entry(color)
            .or_default()
            .insert(connection.to + 1);
        wired_to[connection.to]
            .entry(color)
            .or_default()
            .insert(connection.from + 1);
    }

    let entities = layout
        .entities
        .iter()
        .zip(wired_to)
        .enumerate()
        .map(|(index, (entity, neighbors))| {
            let mut connections = BTreeMap::new();
            if !neighbors.is_empty() {
                let by_color: BTreeMap<&'static str, Vec<ConnectionTarget>> = neighbors
                    .into_iter()
                    .map(|(color, ids)| {
                        let targets = ids.into_iter().map(|entity_id| ConnectionTarget { entity_id }).collect();
                        (color, targets)
                    })
                    .collect();
                connections.insert(CIRCUIT_CONNECTOR_ID, by_color);
            }
            EntityRecord {
                entity_number: index + 1,
                name: SPEAKER_ENTITY,
                position: Position {
                    x: entity.position.x as f64 + 0.5,
                    y: entity.position.y as f64 + 0.5,
                },
                control_behavior: ControlBehavior {
                    circuit_condition: CircuitCondition {
                        first_signal: SignalId::item(&settings.counter_signal),
                        constant: entity.trigger_value,
                        comparator: TRIGGER_COMPARATOR,
                    },
                    circuit_parameters: CircuitParameters {
                        signal_value_is_pitch: false,
                        instrument_id: entity.instrument,
                        note_id: entity.note,
                    },
                },
                parameters: SpeakerRecord {
                    playback_volume: settings.speaker.volume,
                    playback_globally: settings.speaker.play_globally,
                    allow_polyphony: settings.speaker.allow_polyphony,
                },
                alert_parameters: AlertParameters {
                    show_alert: false,
                    show_on_map: true,
                    alert_message: "",
                },
                connections,
            }
        })
        .collect();

    let document = BlueprintDocument {
        blueprint: Blueprint {
            icons: vec![Icon {
                signal: SignalId::item(SPEAKER_ENTITY),
                index: 1,
            }],
            entities,
            item: "blueprint",
            version: GAME_VERSION,
        },
    };

    Ok(serde_json::to_string(&document)?)
}

/// Compress and encode a blueprint JSON document into an import string
pub fn encode_blueprint_json(json: &str) -> Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(json.as_bytes())
        .map_err(ConversionError::Compression)?;
    let compressed = encoder.finish().map_err(ConversionError::Compression)?;

    let mut out = String::with_capacity(1 + compressed.len() * 4 / 3 + 4);
    out.push(BLUEPRINT_FORMAT_VERSION);
    out.push_str(&BASE64.encode(compressed));
    Ok(out)
}

/// Serialize and encode a wired layout in one step
pub fn encode_blueprint(layout: &WiredLayout, settings: &ExportSettings) -> Result<String> {
    let json = blueprint_json(layout, settings)?;
    let encoded = encode_blueprint_json(&json)?;
    log::debug!(
        "encoded blueprint: {} entities, {} json bytes, {} encoded bytes",
        layout.entities.len(),
        json.len(),
        encoded.len()
    );
    Ok(encoded)
}

/// Unpack an import string back into its JSON document
pub fn decode_blueprint(encoded: &str) -> std::result::Result<serde_json::Value, DecodeError> {
    let payload = encoded
        .strip_prefix(BLUEPRINT_FORMAT_VERSION)
        .ok_or_else(|| DecodeError::Invalid("unknown blueprint version byte".to_string()))?;
    let compressed = BASE64
        .decode(payload.trim())
        .map_err(|e| DecodeError::Invalid(format!("bad base64 payload: {}", e)))?;

    let mut json = String::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_string(&mut json)
        .map_err(|e| DecodeError::Invalid(format!("failed to decompress blueprint: {}", e)))?;

    serde_json::from_str(&json).map_err(|e| DecodeError::Json(e.to_string()))
}
