//! Height field companion input
//!
//! A read-only float grid matching the tile grid. Generation uses it twice:
//! to decide which cells may receive a zone type, and to mark obstacles for
//! shortest-path passage routing.

use serde::{Deserialize, Serialize};

use super::{Coord, SURROUNDING};
use crate::error::ConfigError;

/// Float grid, row-major, same dimensions as the tile grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f32>>", into = "Vec<Vec<f32>>")]
pub struct HeightField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl HeightField {
    /// Build from rows (outer index = y); all rows must share one length
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(width * height);
        for (row, data) in rows.into_iter().enumerate() {
            if data.len() != width {
                return Err(ConfigError::RaggedHeightField {
                    row,
                    len: data.len(),
                    expected: width,
                });
            }
            values.extend(data);
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build by sampling `f(x, y)` over every cell
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> f32) -> Self {
        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, c: Coord) -> Option<f32> {
        if c.x < 0 || c.y < 0 || c.x as usize >= self.width || c.y as usize >= self.height {
            return None;
        }
        self.values.get(c.y as usize * self.width + c.x as usize).copied()
    }

    /// Height strictly inside the open interval `(low, high)`
    pub fn within(&self, c: Coord, (low, high): (f32, f32)) -> bool {
        self.get(c).is_some_and(|h| h > low && h < high)
    }
}

impl TryFrom<Vec<Vec<f32>>> for HeightField {
    type Error = ConfigError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<HeightField> for Vec<Vec<f32>> {
    fn from(field: HeightField) -> Self {
        field
            .values
            .chunks(field.width.max(1))
            .map(<[f32]>::to_vec)
            .collect()
    }
}

/// Passability test for path routing derived from a height field
#[derive(Debug, Clone, Copy)]
pub struct ObstacleMask<'a> {
    width: usize,
    height: usize,
    heights: Option<&'a HeightField>,
    bounds: (f32, f32),
    strict: bool,
}

impl<'a> ObstacleMask<'a> {
    pub fn new(
        width: usize,
        height: usize,
        heights: Option<&'a HeightField>,
        bounds: (f32, f32),
        strict: bool,
    ) -> Self {
        Self {
            width,
            height,
            heights,
            bounds,
            strict,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    fn height_ok(&self, c: Coord) -> bool {
        match self.heights {
            Some(field) => field.within(c, self.bounds),
            None => true,
        }
    }

    /// Out of bounds, or height outside the open interval. In strict mode an
    /// in-bounds neighbor failing the height test also blocks the cell.
    pub fn is_obstacle(&self, c: Coord) -> bool {
        if !self.in_bounds(c) || !self.height_ok(c) {
            return true;
        }
        self.strict
            && SURROUNDING
                .iter()
                .map(|&(dx, dy)| c.offset(dx, dy))
                .any(|n| self.in_bounds(n) && !self.height_ok(n))
    }
}
