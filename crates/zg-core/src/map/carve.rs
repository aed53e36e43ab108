//! Passage carving

use super::{Coord, Grid, Tile};

/// How wide passages are cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveSettings {
    pub radius: i32,
    /// Leave a disc untouched if any of its cells is already carved
    pub skip_carved_discs: bool,
}

/// In-bounds cells of the disc `dx² + dy² <= r²` around `center`
fn disc_cells(grid: &Grid, center: Coord, radius: i32) -> impl Iterator<Item = Coord> + '_ {
    let r2 = radius * radius;
    (-radius..=radius)
        .flat_map(move |dx| (-radius..=radius).map(move |dy| (dx, dy)))
        .filter(move |&(dx, dy)| dx * dx + dy * dy <= r2)
        .map(move |(dx, dy)| center.offset(dx, dy))
        .filter(|&c| grid.contains(c))
}

/// Set the disc around `center` to [`Tile::Carved`]; returns cells changed
pub fn stamp_disc(grid: &mut Grid, center: Coord, settings: CarveSettings) -> usize {
    let cells: Vec<Coord> = disc_cells(grid, center, settings.radius).collect();
    if settings.skip_carved_discs && cells.iter().any(|&c| grid.get(c) == Some(Tile::Carved)) {
        return 0;
    }

    let mut changed = 0;
    for c in cells {
        if grid.get(c) != Some(Tile::Carved) {
            grid.set(c, Tile::Carved);
            changed += 1;
        }
    }
    changed
}

/// Stamp a disc at every cell of `route`; returns cells changed
pub fn carve_passage(grid: &mut Grid, route: &[Coord], settings: CarveSettings) -> usize {
    route
        .iter()
        .map(|&c| stamp_disc(grid, c, settings))
        .sum()
}
