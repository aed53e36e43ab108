//! Generator configuration
//!
//! Plain values, deserializable from JSON. Everything but the dimensions has a
//! default, so a minimal config is `{"width": 64, "height": 48}`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::consts::*;
use crate::error::ConfigError;
use crate::map::HeightField;
use crate::rng::Seed;

/// How connecting passages are measured and routed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectMode {
    /// Squared Euclidean distance, straight line walk
    #[default]
    Straight,
    /// A* path cost around height obstacles
    Pathfinding,
}

/// Minimum region sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionThresholds {
    /// Empty regions below this are absorbed into neighboring zones
    pub wall: i32,
    /// Zone regions below this are cleared
    pub room: i32,
}

impl Default for RegionThresholds {
    fn default() -> Self {
        Self {
            wall: DEFAULT_WALL_THRESHOLD,
            room: DEFAULT_ROOM_THRESHOLD,
        }
    }
}

/// Passage routing and carving settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivitySettings {
    pub mode: ConnectMode,
    pub passage_radius: i32,
    /// Open interval of passable heights
    pub obstacle_bounds: (f32, f32),
    /// Also block cells next to an out-of-range height
    pub strict_obstacles: bool,
    /// Leave a disc alone when it already touches a carved cell
    pub skip_carved_discs: bool,
}

impl Default for ConnectivitySettings {
    fn default() -> Self {
        Self {
            mode: ConnectMode::default(),
            passage_radius: DEFAULT_PASSAGE_RADIUS,
            obstacle_bounds: DEFAULT_OBSTACLE_BOUNDS,
            strict_obstacles: false,
            skip_carved_discs: false,
        }
    }
}

/// Full generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    pub seed: Seed,
    /// Ignore `seed` and derive one from the clock
    pub use_random_seed: bool,
    pub fill_percent: u32,
    pub secondary_weight: u32,
    pub smooth_iterations: u32,
    pub erase_iterations: u32,
    pub erase_run_length: u32,
    pub region_thresholds: RegionThresholds,
    pub connectivity: ConnectivitySettings,
    pub border_size: usize,
    pub height_field: Option<HeightField>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            seed: Seed::default(),
            use_random_seed: false,
            fill_percent: DEFAULT_FILL_PERCENT,
            secondary_weight: DEFAULT_SECONDARY_WEIGHT,
            smooth_iterations: DEFAULT_SMOOTH_ITERATIONS,
            erase_iterations: DEFAULT_ERASE_ITERATIONS,
            erase_run_length: DEFAULT_ERASE_RUN_LENGTH,
            region_thresholds: RegionThresholds::default(),
            connectivity: ConnectivitySettings::default(),
            border_size: DEFAULT_BORDER_SIZE,
            height_field: None,
        }
    }
}

impl GeneratorConfig {
    /// Config with the given size and seed, defaults elsewhere
    pub fn new(width: i32, height: i32, seed: impl Into<Seed>) -> Self {
        Self {
            width,
            height,
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Check every caller-controlled value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percent > 100 {
            return Err(ConfigError::FillPercentOutOfRange(self.fill_percent));
        }
        let thresholds = &self.region_thresholds;
        if thresholds.wall < 0 {
            return Err(ConfigError::NegativeThreshold {
                which: "wall",
                value: thresholds.wall,
            });
        }
        if thresholds.room < 0 {
            return Err(ConfigError::NegativeThreshold {
                which: "room",
                value: thresholds.room,
            });
        }
        let (low, high) = self.connectivity.obstacle_bounds;
        if low.partial_cmp(&high) != Some(Ordering::Less) {
            return Err(ConfigError::InvalidObstacleBounds { low, high });
        }
        if self.connectivity.passage_radius < 0 {
            return Err(ConfigError::NegativePassageRadius(
                self.connectivity.passage_radius,
            ));
        }
        if let Some(field) = &self.height_field {
            let (width, height) = (self.width as usize, self.height as usize);
            if field.width() != width || field.height() != height {
                return Err(ConfigError::HeightFieldMismatch {
                    width,
                    height,
                    field_width: field.width(),
                    field_height: field.height(),
                });
            }
        }
        Ok(())
    }

    /// Seed this run will use; a clock timestamp when `use_random_seed` is set
    pub fn resolve_seed(&self) -> Seed {
        if self.use_random_seed {
            Seed::Text(chrono::Local::now().to_rfc3339())
        } else {
            self.seed.clone()
        }
    }
}
