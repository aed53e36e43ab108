//! Connected region extraction
//!
//! A region is a maximal set of same-type cells joined through their four
//! orthogonal neighbors. Extraction for one tile type partitions that type's
//! cells exactly.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{Coord, Grid, ORTHOGONAL, Tile};

/// A connected set of same-type cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    tile: Tile,
    cells: Vec<Coord>,
}

impl Region {
    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Visited mask over a grid's cells
struct VisitMask {
    width: usize,
    seen: Vec<bool>,
}

impl VisitMask {
    fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            seen: vec![false; grid.width() * grid.height()],
        }
    }

    fn contains(&self, c: Coord) -> bool {
        self.seen
            .get(c.y as usize * self.width + c.x as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Mark `c`; returns false if it was already marked. `c` must be in bounds.
    fn mark(&mut self, c: Coord) -> bool {
        let index = c.y as usize * self.width + c.x as usize;
        match self.seen.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }
}

/// Breadth-first flood fill of the `tile` region containing `start`
fn flood_region(grid: &Grid, start: Coord, tile: Tile, mask: &mut VisitMask) -> Region {
    let mut cells = Vec::new();
    let mut queue = VecDeque::new();
    mask.mark(start);
    queue.push_back(start);

    while let Some(c) = queue.pop_front() {
        cells.push(c);
        for &(dx, dy) in &ORTHOGONAL {
            let n = c.offset(dx, dy);
            if grid.get(n) == Some(tile) && mask.mark(n) {
                queue.push_back(n);
            }
        }
    }

    Region { tile, cells }
}

/// All regions of `tile`, in scan order of their first cell
pub fn extract_regions(grid: &Grid, tile: Tile) -> Vec<Region> {
    let mut mask = VisitMask::new(grid);
    let mut regions = Vec::new();

    for c in grid.coords() {
        if grid.get(c) == Some(tile) && !mask.contains(c) {
            regions.push(flood_region(grid, c, tile, &mut mask));
        }
    }

    regions
}
