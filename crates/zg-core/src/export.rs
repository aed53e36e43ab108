//! JSON export of a finished map
//!
//! The tile rows are the integer codes of the bordered grid, which is what a
//! mesh builder consumes alongside a wall threshold.

use serde::{Deserialize, Serialize};

use crate::map::{ConnectPhase, Coord, GeneratedMap, Tile};
use crate::rng::Seed;

/// Summary of one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: usize,
    pub tile: Tile,
    pub size: usize,
    pub edge_tiles: usize,
    pub connections: Vec<usize>,
    pub is_main_room: bool,
    pub accessible: bool,
}

/// One passage, by room index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageSummary {
    pub a: usize,
    pub b: usize,
    pub from: Coord,
    pub to: Coord,
    pub phase: ConnectPhase,
    pub distance: u64,
}

/// Serializable view of a [`GeneratedMap`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapExport {
    pub seed: Seed,
    pub seed_value: u64,
    pub width: usize,
    pub height: usize,
    /// Code of [`Tile::Wall`]; codes at or above it are solid
    pub wall_code: u8,
    /// Bordered grid codes, outer index = y
    pub tiles: Vec<Vec<u8>>,
    pub rooms: Vec<RoomSummary>,
    pub passages: Vec<PassageSummary>,
    pub unreachable: Vec<usize>,
}

impl MapExport {
    pub fn from_map(map: &GeneratedMap) -> Self {
        let rooms = map
            .rooms
            .rooms()
            .iter()
            .map(|room| RoomSummary {
                id: room.id.0,
                tile: room.tile,
                size: room.size(),
                edge_tiles: room.edge_tiles.len(),
                connections: room.connections.iter().map(|id| id.0).collect(),
                is_main_room: room.is_main_room,
                accessible: room.is_accessible_from_main_room,
            })
            .collect();
        let passages = map
            .report
            .connections
            .iter()
            .map(|c| PassageSummary {
                a: c.a.0,
                b: c.b.0,
                from: c.from,
                to: c.to,
                phase: c.phase,
                distance: c.distance,
            })
            .collect();

        Self {
            seed: map.seed.clone(),
            seed_value: map.seed_value,
            width: map.bordered.width(),
            height: map.bordered.height(),
            wall_code: Tile::Wall.code(),
            tiles: map.bordered.code_rows(),
            rooms,
            passages,
            unreachable: map.report.unreachable.iter().map(|id| id.0).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&GeneratedMap> for MapExport {
    fn from(map: &GeneratedMap) -> Self {
        Self::from_map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeneratorConfig, MapGenerator};

    #[test]
    fn test_export_matches_bordered_grid() {
        let map = MapGenerator::new(GeneratorConfig::new(20, 15, "export"))
            .unwrap()
            .generate();
        let export = MapExport::from(&map);

        assert_eq!((export.width, export.height), (22, 17));
        assert_eq!(export.tiles.len(), 17);
        assert!(export.tiles.iter().all(|row| row.len() == 22));
        assert!(export.tiles[0].iter().all(|&code| code == export.wall_code));
        assert_eq!(export.rooms.len(), map.rooms.len());
        assert_eq!(export.passages.len(), map.report.connections.len());
    }

    #[test]
    fn test_json_shape() {
        let map = MapGenerator::new(GeneratorConfig::new(12, 12, 5u64))
            .unwrap()
            .generate();
        let json = MapExport::from(&map).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 5);
        assert_eq!(value["wall_code"], 4);
        assert!(value["tiles"].is_array());
        assert!(value["unreachable"].is_array());

        let back: MapExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MapExport::from(&map));
    }
}
