//! Zone map generation
//!
//! Grid primitives plus one module per generation stage, in run order: fill,
//! smooth, erode, filter, rooms, connect, border.

mod border;
mod carve;
mod cell;
mod connect;
mod erode;
mod fill;
mod filter;
mod generation;
mod grid;
mod height;
mod pathfind;
mod region;
mod room;
mod smooth;

pub use border::wrap_border;
pub use carve::{CarveSettings, carve_passage, stamp_disc};
pub use cell::Tile;
pub use connect::{
    ConnectPhase, Connection, ConnectionReport, ConnectivityConnector, Measurement,
    PassageMetric, ShortestPath, StraightLine,
};
pub use erode::{erase_isolated, erase_pass, has_axis_run};
pub use fill::{FillParams, random_fill};
pub use filter::{
    FilterOutcome, absorb_small_wall_regions, clear_small_zone_regions, filter_regions,
};
pub use generation::{GeneratedMap, GenerationStats, MapGenerator};
pub use grid::{Coord, Grid, ORTHOGONAL, SURROUNDING};
pub use height::{HeightField, ObstacleMask};
pub use pathfind::{
    Path, Reachability, find_path, heuristic, line_walk, octile_lower_bound,
};
pub use region::{Region, extract_regions};
pub use room::{ConnectionState, Room, RoomGraph, RoomId};
pub use smooth::{SmoothStats, smooth, smooth_pass};
