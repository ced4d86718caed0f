// Speaker blueprint export: layout, wiring and the encoded import string

use std::collections::{HashSet, VecDeque};

use nbs_export::renderers::blueprint::{build_wired_layout, decode_blueprint, ConnectionKind};
use nbs_export::{render_blueprint, ExportSettings, Note, Song};

fn song_of(count: u32, length: u32) -> Song {
    let notes: Vec<Note> = (0..count).map(|i| Note::new(i, (i % 16) as i32, 33 + (i % 24) as i32)).collect();
    let groups = nbs_export::converters::group_flat_notes(&notes).unwrap();
    Song::new(10.0, length, groups).unwrap()
}

#[test]
fn test_length_100_song_with_25_notes() {
    let layout = build_wired_layout(&song_of(25, 100), &ExportSettings::default()).unwrap();

    let rows: HashSet<u32> = layout.entities.iter().map(|e| e.position.y).collect();
    assert!(rows.len() <= 3);
    for entity in &layout.entities {
        assert!(entity.position.x <= 10);
        assert!(entity.position.x == 0 || entity.position.x % 6 != 0);
    }
    let cells: HashSet<_> = layout.entities.iter().map(|e| e.position).collect();
    assert_eq!(cells.len(), 25);
}

#[test]
fn test_wiring_counts() {
    let layout = build_wired_layout(&song_of(60, 49), &ExportSettings::default()).unwrap();
    let rows: HashSet<u32> = layout.entities.iter().map(|e| e.position.y).collect();

    let chain = layout.connections.iter().filter(|c| c.kind == ConnectionKind::Chain).count();
    let anchors = layout.connections.iter().filter(|c| c.kind == ConnectionKind::RowAnchor).count();
    assert_eq!(chain, 59);
    assert_eq!(anchors, rows.len() - 1);
}

#[test]
fn test_encoded_blueprint_is_connected() {
    let encoded = render_blueprint(&song_of(40, 64), &ExportSettings::default()).unwrap();
    let json = decode_blueprint(&encoded).unwrap();
    let entities = json["blueprint"]["entities"].as_array().unwrap();
    assert_eq!(entities.len(), 40);

    // BFS over entity_number via the red wires
    let mut seen = HashSet::from([1u64]);
    let mut queue = VecDeque::from([1u64]);
    while let Some(id) = queue.pop_front() {
        let entity = &entities[(id - 1) as usize];
        for wire in entity["connections"]["1"]["red"].as_array().unwrap() {
            let next = wire["entity_id"].as_u64().unwrap();
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    assert_eq!(seen.len(), 40);
}

#[test]
fn test_trigger_and_percussion_in_blueprint() {
    // harp at tick 2, snare at tick 3
    let groups = nbs_export::converters::group_flat_notes(&[Note::new(2, 0, 39), Note::new(3, 3, 60)]).unwrap();
    let song = Song::new(10.0, 4, groups).unwrap();
    let json = decode_blueprint(&render_blueprint(&song, &ExportSettings::default()).unwrap()).unwrap();
    let entities = json["blueprint"]["entities"].as_array().unwrap();

    let harp = &entities[0]["control_behavior"];
    assert_eq!(harp["circuit_condition"]["constant"], 11);
    assert_eq!(harp["circuit_parameters"]["instrument_id"], 3);
    assert_eq!(harp["circuit_parameters"]["note_id"], 15);

    let snare = &entities[1]["control_behavior"];
    assert_eq!(snare["circuit_condition"]["constant"], 16);
    assert_eq!(snare["circuit_parameters"]["instrument_id"], 2);
    assert_eq!(snare["circuit_parameters"]["note_id"], 4);
}

#[test]
fn test_output_is_deterministic() {
    let song = song_of(30, 30);
    let settings = ExportSettings::default();
    assert_eq!(
        render_blueprint(&song, &settings).unwrap(),
        render_blueprint(&song, &settings).unwrap()
    );
}
