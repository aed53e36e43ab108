//! Tile states

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// State of a single grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    /// Unzoned ground; the "wall" side of region filtering
    #[default]
    Empty = 0,
    /// Primary zone type
    TypeA = 1,
    /// Secondary zone type
    TypeB = 2,
    /// Opened by a connecting passage
    Carved = 3,
    /// Impassable perimeter added by the border wrapper
    Wall = 4,
}

impl Tile {
    /// Tile types that form rooms
    pub const ZONES: [Tile; 2] = [Tile::TypeA, Tile::TypeB];

    /// Stable integer code, as handed to mesh builders
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    pub const fn is_zone(&self) -> bool {
        matches!(self, Tile::TypeA | Tile::TypeB)
    }

    /// Check if this can be walked through
    pub const fn is_passable(&self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// Get the display character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::TypeA => '#',
            Tile::TypeB => '%',
            Tile::Carved => '+',
            Tile::Wall => 'X',
        }
    }

    /// Inverse of [`Tile::symbol`]
    pub const fn from_symbol(symbol: char) -> Option<Tile> {
        match symbol {
            '.' => Some(Tile::Empty),
            '#' => Some(Tile::TypeA),
            '%' => Some(Tile::TypeB),
            '+' => Some(Tile::Carved),
            'X' => Some(Tile::Wall),
            _ => None,
        }
    }
}
