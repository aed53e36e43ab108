//! Rooms and the room connection graph
//!
//! Rooms live in a flat arena indexed by [`RoomId`]; connections are stored as
//! ID lists on both endpoints. The largest room is the main room, and a room
//! is accessible when a chain of connections leads back to it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::region::Region;
use super::{Coord, Grid, Tile};

/// Index of a room in its [`RoomGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

/// Where a room stands with respect to the main room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No connections at all
    Unconnected,
    /// Has connections, none of which lead to the main room
    ConnectedNotAccessible,
    /// Reachable from the main room
    Accessible,
}

/// A surviving region promoted to a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub tile: Tile,
    pub tiles: Vec<Coord>,
    /// Tiles with at least one in-bounds 8-neighbor of another type
    pub edge_tiles: Vec<Coord>,
    pub connections: Vec<RoomId>,
    pub is_main_room: bool,
    pub is_accessible_from_main_room: bool,
}

impl Room {
    fn from_region(id: RoomId, region: Region, grid: &Grid) -> Self {
        let tile = region.tile();
        let edge_tiles = region
            .cells()
            .iter()
            .copied()
            .filter(|&c| grid.surrounding(c).any(|n| grid.get(n) != Some(tile)))
            .collect();
        Self {
            id,
            tile,
            tiles: region.cells().to_vec(),
            edge_tiles,
            connections: Vec::new(),
            is_main_room: false,
            is_accessible_from_main_room: false,
        }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_connected(&self, other: RoomId) -> bool {
        self.connections.contains(&other)
    }

    pub fn state(&self) -> ConnectionState {
        if self.is_accessible_from_main_room {
            ConnectionState::Accessible
        } else if self.connections.is_empty() {
            ConnectionState::Unconnected
        } else {
            ConnectionState::ConnectedNotAccessible
        }
    }
}

/// Arena of rooms plus their undirected connections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    /// Promote `regions` to rooms, largest first
    ///
    /// The sort is stable, so equal-sized rooms keep extraction order. The
    /// first room becomes the main room.
    pub fn build(mut regions: Vec<Region>, grid: &Grid) -> Self {
        regions.sort_by(|a, b| b.len().cmp(&a.len()));

        let mut rooms: Vec<Room> = regions
            .into_iter()
            .enumerate()
            .map(|(i, region)| Room::from_region(RoomId(i), region, grid))
            .collect();

        if let Some(main) = rooms.first_mut() {
            main.is_main_room = true;
            main.is_accessible_from_main_room = true;
        }

        Self { rooms }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = RoomId> + use<> {
        (0..self.rooms.len()).map(RoomId)
    }

    pub fn main_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.is_main_room)
    }

    pub fn is_accessible(&self, id: RoomId) -> bool {
        self.get(id).is_some_and(|r| r.is_accessible_from_main_room)
    }

    pub fn is_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.get(a).is_some_and(|r| r.is_connected(b))
    }

    pub fn has_connections(&self, id: RoomId) -> bool {
        self.get(id).is_some_and(|r| !r.connections.is_empty())
    }

    /// Add an undirected edge and spread accessibility across it
    ///
    /// Returns false for self-loops or unknown IDs. Repeated edges are ignored.
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || a.0 >= self.rooms.len() || b.0 >= self.rooms.len() {
            return false;
        }
        if !self.rooms[a.0].is_connected(b) {
            self.rooms[a.0].connections.push(b);
            self.rooms[b.0].connections.push(a);
        }

        if self.is_accessible(a) {
            self.mark_accessible_from(b);
        } else if self.is_accessible(b) {
            self.mark_accessible_from(a);
        }
        true
    }

    /// Flag `start` and everything reachable through its edges as accessible
    ///
    /// Breadth-first over the ID lists; rooms already accessible stop the walk.
    fn mark_accessible_from(&mut self, start: RoomId) {
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            let Some(room) = self.rooms.get_mut(id.0) else {
                continue;
            };
            if room.is_accessible_from_main_room && id != start {
                continue;
            }
            room.is_accessible_from_main_room = true;
            let connections = room.connections.clone();
            queue.extend(
                connections
                    .into_iter()
                    .filter(|next| !self.rooms[next.0].is_accessible_from_main_room),
            );
        }
    }

    pub fn accessible_ids(&self) -> Vec<RoomId> {
        self.ids().filter(|&id| self.is_accessible(id)).collect()
    }

    /// Rooms with no chain of connections back to the main room
    pub fn unreachable_ids(&self) -> Vec<RoomId> {
        self.ids().filter(|&id| !self.is_accessible(id)).collect()
    }
}
