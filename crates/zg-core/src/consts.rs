//! Generation defaults

/// Smoothing passes; well past the point where the automaton settles
pub const DEFAULT_SMOOTH_ITERATIONS: u32 = 1000;

/// Isolated-feature erasure passes (disabled unless requested)
pub const DEFAULT_ERASE_ITERATIONS: u32 = 0;

/// Same-type run length a cell needs along some axis to survive erasure
pub const DEFAULT_ERASE_RUN_LENGTH: u32 = 3;

/// Share of the draw range given to the secondary tile type
pub const DEFAULT_SECONDARY_WEIGHT: u32 = 15;

pub const DEFAULT_FILL_PERCENT: u32 = 45;

/// Empty regions below this many cells are absorbed by their surroundings
pub const DEFAULT_WALL_THRESHOLD: i32 = 50;

/// Typed regions below this many cells are cleared instead of becoming rooms
pub const DEFAULT_ROOM_THRESHOLD: i32 = 50;

pub const DEFAULT_PASSAGE_RADIUS: i32 = 1;

/// Open height interval used for fill eligibility and path obstacles
pub const DEFAULT_OBSTACLE_BOUNDS: (f32, f32) = (0.2, 0.7);

pub const DEFAULT_BORDER_SIZE: usize = 1;

/// A* cost of an orthogonal step
pub const STRAIGHT_STEP_COST: i64 = 10;

/// A* cost of a diagonal step
pub const DIAGONAL_STEP_COST: i64 = 14;
