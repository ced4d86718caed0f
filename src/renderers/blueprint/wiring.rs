//! Circuit wiring
//!
//! Speakers are daisy-chained: each new speaker is wired to the one placed
//! just before it, across row boundaries. Row starts are additionally
//! wired to the start of the previous row. Wire count stays linear in the
//! number of speakers and every speaker sees the shared counter signal.

use std::collections::HashMap;

use super::layout::{GridPosition, PlacedEntity};
use crate::settings::WireColor;

/// Why a connection exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// New entity to the previously placed entity
    Chain,
    /// Row start to the previous row's start
    RowAnchor,
}

/// Undirected wire between two entities, by index into `WiredLayout::entities`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub color: WireColor,
    pub kind: ConnectionKind,
}

/// Placed entities plus the wires between them
#[derive(Debug, Clone, Default)]
pub struct WiredLayout {
    pub entities: Vec<PlacedEntity>,
    pub connections: Vec<Connection>,
}

impl WiredLayout {
    /// Indices of every entity wired to `index`, in connection order
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.connections.iter().filter_map(move |c| {
            if c.from == index {
                Some(c.to)
            } else if c.to == index {
                Some(c.from)
            } else {
                None
            }
        })
    }
}

/// Wires entities as they are placed, for one conversion job
#[derive(Debug)]
pub struct CircuitWirer {
    color: WireColor,
    last_entity: Option<usize>,
    by_position: HashMap<GridPosition, usize>,
    layout: WiredLayout,
}

impl CircuitWirer {
    pub fn new(color: WireColor) -> Self {
        Self {
            color,
            last_entity: None,
            by_position: HashMap::new(),
            layout: WiredLayout::default(),
        }
    }

    /// Add an entity, connecting it to the row above and to its predecessor
    pub fn add(&mut self, entity: PlacedEntity) -> usize {
        let index = self.layout.entities.len();
        let position = entity.position;

        if position.is_row_start() && position.y > 0 {
            let above = GridPosition::new(0, position.y - 1);
            if let Some(&anchor) = self.by_position.get(&above) {
                self.connect(index, anchor, ConnectionKind::RowAnchor);
            }
        }

        if let Some(previous) = self.last_entity {
            self.connect(index, previous, ConnectionKind::Chain);
        }

        self.last_entity = Some(index);
        self.by_position.insert(position, index);
        self.layout.entities.push(entity);
        index
    }

    fn connect(&mut self, from: usize, to: usize, kind: ConnectionKind) {
        self.layout.connections.push(Connection {
            from,
            to,
            color: self.color,
            kind,
        });
    }

    pub fn finish(self) -> WiredLayout {
        self.layout
    }
}

/// Wire a complete placement sequence
pub fn wire_entities(entities: impl IntoIterator<Item = PlacedEntity>, color: WireColor) -> WiredLayout {
    let mut wirer = CircuitWirer::new(color);
    for entity in entities {
        wirer.add(entity);
    }
    wirer.finish()
}
