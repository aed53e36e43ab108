//! Isolated feature removal
//!
//! A zoned cell survives only if, in at least one axis direction, the next
//! `run_length` cells all share its type. Thin spurs and specks left over by
//! smoothing get reset to empty.

use log::debug;

use super::{Coord, Grid, ORTHOGONAL, Tile};

/// Check for `run_length` same-type cells leading away from `c` in any axis direction
///
/// Runs that would leave the grid do not count.
pub fn has_axis_run(grid: &Grid, c: Coord, tile: Tile, run_length: u32) -> bool {
    let n = run_length as i32;
    ORTHOGONAL.iter().any(|&(dx, dy)| {
        grid.contains(c.offset(dx * n, dy * n))
            && (1..=n).all(|i| grid.get(c.offset(dx * i, dy * i)) == Some(tile))
    })
}

/// One erasure pass; reads from a snapshot so results do not depend on scan order
///
/// Returns the number of cells cleared.
pub fn erase_pass(grid: &mut Grid, run_length: u32) -> usize {
    let snapshot = grid.clone();
    let mut cleared = 0;
    for c in snapshot.coords() {
        let Some(tile) = snapshot.get(c) else {
            continue;
        };
        if tile == Tile::Empty {
            continue;
        }
        if !has_axis_run(&snapshot, c, tile, run_length) {
            grid.set(c, Tile::Empty);
            cleared += 1;
        }
    }
    cleared
}

/// Run `iterations` erasure passes
pub fn erase_isolated(grid: &mut Grid, iterations: u32, run_length: u32) -> usize {
    let mut total = 0;
    for pass in 0..iterations {
        let cleared = erase_pass(grid, run_length);
        debug!("erasure pass {pass}: cleared {cleared} cells");
        total += cleared;
        if cleared == 0 {
            break;
        }
    }
    total
}
