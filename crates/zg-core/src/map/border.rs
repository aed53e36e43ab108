//! Impassable border

use super::{Coord, Grid, Tile};

/// Copy `grid` into the middle of a larger grid ringed by `border_size` walls
pub fn wrap_border(grid: &Grid, border_size: usize) -> Grid {
    let mut wrapped = Grid::new(
        grid.width() + 2 * border_size,
        grid.height() + 2 * border_size,
        Tile::Wall,
    );
    let offset = border_size as i32;
    for c in grid.coords() {
        if let Some(tile) = grid.get(c) {
            wrapped.set(Coord::new(c.x + offset, c.y + offset), tile);
        }
    }
    wrapped
}
