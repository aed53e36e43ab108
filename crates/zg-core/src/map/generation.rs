//! Full generation run
//!
//! Drives the stages in order: fill, smooth, erase, filter, build rooms,
//! connect, wrap. The grid belongs to the run from first fill to final border.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::carve::CarveSettings;
use super::connect::{ConnectionReport, ConnectivityConnector, ShortestPath, StraightLine};
use super::fill::{FillParams, random_fill};
use super::filter::filter_regions;
use super::room::RoomGraph;
use super::{Grid, ObstacleMask, erase_isolated, smooth, wrap_border};
use crate::config::{ConnectMode, GeneratorConfig};
use crate::error::ConfigError;
use crate::rng::{MapRng, Seed};

/// Per-stage counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub smooth_passes: u32,
    pub smooth_converged: bool,
    pub cells_erased: usize,
    pub wall_regions_absorbed: usize,
    pub zone_regions_cleared: usize,
}

/// Result of [`MapGenerator::generate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMap {
    /// Seed the run used, as supplied or derived from the clock
    pub seed: Seed,
    /// Numeric value the RNG was seeded with
    pub seed_value: u64,
    /// Final grid without the border
    pub grid: Grid,
    /// `grid` wrapped in its wall border
    pub bordered: Grid,
    pub rooms: RoomGraph,
    pub report: ConnectionReport,
    pub stats: GenerationStats,
}

/// Validated configuration, ready to run
#[derive(Debug, Clone)]
pub struct MapGenerator {
    config: GeneratorConfig,
}

impl MapGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run every stage once with a fresh RNG
    pub fn generate(&self) -> GeneratedMap {
        let config = &self.config;
        let seed = config.resolve_seed();
        let mut rng = MapRng::from_seed(&seed);
        let (width, height) = (config.width as usize, config.height as usize);
        let connectivity = &config.connectivity;
        let heights = config.height_field.as_ref();

        info!(
            "generating {width}x{height} map, seed {seed} ({}), {} passages",
            rng.seed(),
            connectivity.mode
        );

        let mut grid = random_fill(
            &FillParams {
                width,
                height,
                fill_percent: config.fill_percent,
                secondary_weight: config.secondary_weight,
                heights,
                height_bounds: connectivity.obstacle_bounds,
            },
            &mut rng,
        );

        let smoothing = smooth(&mut grid, config.smooth_iterations);
        let cells_erased =
            erase_isolated(&mut grid, config.erase_iterations, config.erase_run_length);
        let filtered = filter_regions(&mut grid, &config.region_thresholds);

        let mut rooms = RoomGraph::build(filtered.survivors, &grid);
        debug!("{} rooms", rooms.len());

        let carve = CarveSettings {
            radius: connectivity.passage_radius,
            skip_carved_discs: connectivity.skip_carved_discs,
        };
        let report = match connectivity.mode {
            ConnectMode::Straight => {
                ConnectivityConnector::new(StraightLine, carve).connect(&mut rooms, &mut grid)
            }
            ConnectMode::Pathfinding => {
                let mask = ObstacleMask::new(
                    width,
                    height,
                    heights,
                    connectivity.obstacle_bounds,
                    connectivity.strict_obstacles,
                );
                ConnectivityConnector::new(ShortestPath::new(mask), carve)
                    .connect(&mut rooms, &mut grid)
            }
        };

        let bordered = wrap_border(&grid, config.border_size);

        info!(
            "generated {} rooms with {} passages, {} unreachable",
            rooms.len(),
            report.connections.len(),
            report.unreachable.len()
        );

        GeneratedMap {
            seed_value: rng.seed(),
            seed,
            grid,
            bordered,
            rooms,
            report,
            stats: GenerationStats {
                smooth_passes: smoothing.passes_applied,
                smooth_converged: smoothing.converged,
                cells_erased,
                wall_regions_absorbed: filtered.wall_regions_absorbed,
                zone_regions_cleared: filtered.zone_regions_cleared,
            },
        }
    }
}
