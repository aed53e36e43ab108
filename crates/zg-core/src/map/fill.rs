//! Initial noise fill
//!
//! Produces the raw grid the smoother relaxes into zones: one percentile draw
//! per interior cell, weighted between the two zone types and empty ground.

use crate::rng::MapRng;

use super::{Coord, Grid, HeightField, Tile};

/// Parameters for [`random_fill`]
#[derive(Debug, Clone, Copy)]
pub struct FillParams<'a> {
    pub width: usize,
    pub height: usize,
    /// Draws below this become `TypeA`
    pub fill_percent: u32,
    /// Draws in `fill_percent..fill_percent + secondary_weight` become `TypeB`
    pub secondary_weight: u32,
    /// Cells whose height leaves `height_bounds` stay empty
    pub heights: Option<&'a HeightField>,
    pub height_bounds: (f32, f32),
}

/// Fill a new grid from `rng`
///
/// Perimeter cells are always empty and consume no draws. Interior cells
/// consume exactly one draw each, in column order, whether or not the height
/// field lets them take a zone type.
pub fn random_fill(params: &FillParams<'_>, rng: &mut MapRng) -> Grid {
    let mut grid = Grid::new(params.width, params.height, Tile::Empty);
    let type_b_limit = params.fill_percent.saturating_add(params.secondary_weight);

    for x in 0..params.width as i32 {
        for y in 0..params.height as i32 {
            if grid.is_perimeter(x, y) {
                continue;
            }
            let c = Coord::new(x, y);
            let roll = rng.roll_percent();
            let eligible = params
                .heights
                .is_none_or(|field| field.within(c, params.height_bounds));
            let tile = if !eligible {
                Tile::Empty
            } else if roll < params.fill_percent {
                Tile::TypeA
            } else if roll < type_b_limit {
                Tile::TypeB
            } else {
                Tile::Empty
            };
            grid.set(c, tile);
        }
    }

    grid
}
