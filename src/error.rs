//! Error types for Voronoi stippling

use thiserror::Error;

/// Errors that can occur while building or relaxing a stipple set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StippleError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cone mesh parameters violate a construction precondition
    #[error("invalid cone mesh: {0}")]
    InvalidMesh(String),

    /// A point's color key is already taken by another point or reserved
    /// for the background
    ///
    /// Recoverable: regenerate colors (possibly with another scheme) and retry.
    #[error("color key {key:#010x} of point {slot} is already taken")]
    ColorCollision {
        /// Packed RGBA key
        key: u32,
        /// Slot of the point whose color collided
        slot: usize,
    },

    /// The render target returned a pixel buffer of the wrong size
    #[error("readback buffer has {actual} bytes, expected {expected}")]
    ReadbackMismatch {
        /// `width * height * 4`
        expected: usize,
        /// Length actually returned by the target
        actual: usize,
    },

    /// Density field dimensions and sample data disagree
    #[error("invalid density field: {0}")]
    InvalidDensityField(String),
}

/// Result type alias for stippling operations
pub type Result<T> = std::result::Result<T, StippleError>;
