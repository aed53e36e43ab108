//! Configuration errors
//!
//! Generation itself cannot fail once a configuration has been accepted; every
//! problem the caller can cause is caught up front and reported here.

use thiserror::Error;

/// Reasons a [`GeneratorConfig`](crate::GeneratorConfig) is rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("height field is {field_width}x{field_height} but the grid is {width}x{height}")]
    HeightFieldMismatch {
        width: usize,
        height: usize,
        field_width: usize,
        field_height: usize,
    },

    #[error("height field row {row} has {len} values, expected {expected}")]
    RaggedHeightField { row: usize, len: usize, expected: usize },

    #[error("{which} region threshold must not be negative, got {value}")]
    NegativeThreshold { which: &'static str, value: i32 },

    #[error("fill percent must lie in 0..=100, got {0}")]
    FillPercentOutOfRange(u32),

    #[error("obstacle bounds must satisfy low < high, got ({low}, {high})")]
    InvalidObstacleBounds { low: f32, high: f32 },

    #[error("passage radius must not be negative, got {0}")]
    NegativePassageRadius(i32),
}
