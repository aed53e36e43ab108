//! zg-core: zone map generation
//!
//! Turns a seed and a handful of parameters into a 2D zoning grid: random
//! noise relaxed by a cellular automaton, split into regions, filtered into
//! rooms, and joined by carved passages so every room reaches the main one.
//!
//! This crate does no terminal or file I/O; it logs through the `log` facade.

pub mod config;
pub mod error;
pub mod export;
pub mod map;

mod consts;
mod rng;

pub use config::{ConnectMode, ConnectivitySettings, GeneratorConfig, RegionThresholds};
pub use consts::*;
pub use error::ConfigError;
pub use export::MapExport;
pub use map::{GeneratedMap, MapGenerator};
pub use rng::{MapRng, Seed, hash_seed_text};
