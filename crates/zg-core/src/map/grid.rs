//! Tile grid and coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Tile;

/// Orthogonal neighbor offsets in fixed search order: +x, -x, +y, -y
pub const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// All eight neighbor offsets, row by row
pub const SURROUNDING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Integer grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Squared Euclidean distance
    pub fn distance_squared(self, other: Coord) -> u64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        (dx * dx + dy * dy) as u64
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Fixed-size 2D tile array, stored row-major
///
/// Every access is range-checked: reads outside the grid yield `None` and
/// writes outside it are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Create a grid filled with `tile`
    pub fn new(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            cells: vec![tile; width * height],
        }
    }

    /// Parse rows of tile symbols (outer index = y); unknown symbols read as empty
    ///
    /// The width is taken from the first row; shorter rows are padded with empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Self::new(width, rows.len(), Tile::Empty);
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let tile = Tile::from_symbol(symbol).unwrap_or_default();
                grid.set(Coord::new(x as i32, y as i32), tile);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major index of `(x, y)`, if it lies inside the grid
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.in_bounds(c.x, c.y)
    }

    /// Check whether `(x, y)` lies on the outermost ring
    pub fn is_perimeter(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y)
            && (x == 0 || y == 0 || x as usize == self.width - 1 || y as usize == self.height - 1)
    }

    pub fn get(&self, c: Coord) -> Option<Tile> {
        self.index_of(c.x, c.y).map(|i| self.cells[i])
    }

    /// Write `tile` at `c`; returns false if `c` is outside the grid
    pub fn set(&mut self, c: Coord, tile: Tile) -> bool {
        match self.index_of(c.x, c.y) {
            Some(i) => {
                self.cells[i] = tile;
                true
            }
            None => false,
        }
    }

    /// All coordinates, column by column (x outer, y inner)
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..w).flat_map(move |x| (0..h).map(move |y| Coord::new(x, y)))
    }

    /// In-bounds coordinates among the eight around `c`
    pub fn surrounding(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        SURROUNDING
            .iter()
            .map(move |&(dx, dy)| c.offset(dx, dy))
            .filter(|n| self.contains(*n))
    }

    /// Count tiles equal to `tile` among the in-bounds eight neighbors of `c`
    pub fn count_surrounding(&self, c: Coord, tile: Tile) -> usize {
        self.surrounding(c)
            .filter(|&n| self.get(n) == Some(tile))
            .count()
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    /// Rows of integer tile codes, outer index = y
    pub fn code_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(Tile::code).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(Tile::symbol).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
