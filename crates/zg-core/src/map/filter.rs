//! Undersized region filtering
//!
//! Small pockets of empty ground are absorbed into the zones around them, and
//! small zone fragments are cleared back to empty. What remains of each zone
//! type becomes the room candidates.

use log::debug;

use super::region::{Region, extract_regions};
use super::{Coord, Grid, ORTHOGONAL, Tile};
use crate::config::RegionThresholds;

/// Outcome of [`filter_regions`]
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Zone regions large enough to become rooms
    pub survivors: Vec<Region>,
    /// Empty regions absorbed into neighboring zones
    pub wall_regions_absorbed: usize,
    /// Zone regions cleared to empty
    pub zone_regions_cleared: usize,
}

/// Zone type of the first in-bounds orthogonal neighbor, searched +x, -x, +y, -y
fn neighbor_zone(grid: &Grid, c: Coord) -> Option<Tile> {
    ORTHOGONAL
        .iter()
        .filter_map(|&(dx, dy)| grid.get(c.offset(dx, dy)))
        .find(Tile::is_zone)
}

/// Fill an empty region from its rim inward
///
/// Each round assigns every still-empty cell that touches a zone, reading the
/// grid as it was at the start of the round. Stops early only if the region
/// touches no zone at all. Returns false if nothing could be assigned.
fn absorb_region(grid: &mut Grid, region: &Region) -> bool {
    let mut pending: Vec<Coord> = region.cells().to_vec();
    let mut absorbed = false;

    while !pending.is_empty() {
        let assignments: Vec<(Coord, Tile)> = pending
            .iter()
            .filter_map(|&c| neighbor_zone(grid, c).map(|tile| (c, tile)))
            .collect();
        if assignments.is_empty() {
            break;
        }
        for &(c, tile) in &assignments {
            grid.set(c, tile);
        }
        absorbed = true;
        pending.retain(|&c| grid.get(c) == Some(Tile::Empty));
    }
    absorbed
}

/// Absorb empty regions smaller than `threshold`; returns how many
pub fn absorb_small_wall_regions(grid: &mut Grid, threshold: usize) -> usize {
    let small: Vec<Region> = extract_regions(grid, Tile::Empty)
        .into_iter()
        .filter(|r| r.len() < threshold)
        .collect();
    small
        .iter()
        .filter(|region| absorb_region(grid, region))
        .count()
}

/// Clear zone regions smaller than `threshold`; returns the rest and the cleared count
pub fn clear_small_zone_regions(grid: &mut Grid, threshold: usize) -> (Vec<Region>, usize) {
    let mut survivors = Vec::new();
    let mut cleared = 0;

    for tile in Tile::ZONES {
        for region in extract_regions(grid, tile) {
            if region.len() < threshold {
                for &c in region.cells() {
                    grid.set(c, Tile::Empty);
                }
                cleared += 1;
            } else {
                survivors.push(region);
            }
        }
    }

    (survivors, cleared)
}

/// Run both filters, empty regions first
pub fn filter_regions(grid: &mut Grid, thresholds: &RegionThresholds) -> FilterOutcome {
    let wall_threshold = usize::try_from(thresholds.wall).unwrap_or(0);
    let room_threshold = usize::try_from(thresholds.room).unwrap_or(0);

    let wall_regions_absorbed = absorb_small_wall_regions(grid, wall_threshold);
    let (survivors, zone_regions_cleared) = clear_small_zone_regions(grid, room_threshold);

    debug!(
        "region filter: absorbed {wall_regions_absorbed} empty regions, cleared {zone_regions_cleared} zone regions, {} survivors",
        survivors.len()
    );

    FilterOutcome {
        survivors,
        wall_regions_absorbed,
        zone_regions_cleared,
    }
}
