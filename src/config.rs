//! Stippling configuration and builder

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, StippleError};
use crate::point::Color;

/// Configuration for a stippling run
///
/// The same configuration (seed included) run against the same surface and
/// density field always produces the same points.
///
/// # Example
///
/// ```rust
/// use voronoi_stipple::*;
///
/// let config = StippleConfigBuilder::new()
///     .seed(42)
///     .point_count(25)
///     .convergence_threshold(0.5)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.point_count, 25);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StippleConfig {
    /// Seed for initial point placement and fallback colors
    pub seed: u32,

    /// Number of generating points placed by `start`
    pub point_count: usize,

    /// Base radius of each cone, in surface pixels
    ///
    /// Must reach across the whole surface from any point, or far pixels are
    /// left unowned.
    pub cone_radius: f32,

    /// Angular subdivisions of the cone mesh
    pub cone_fragments: usize,

    /// Relaxation stops once no point moves further than this in one step
    pub convergence_threshold: f32,

    /// Optional cap on steps per run; `None` runs until convergence
    pub max_steps: Option<usize>,

    /// Radius of the dots drawn for each point
    pub stipple_size: f32,

    /// Color of the dots drawn for each point
    pub stipple_color: Color,

    /// Whether display renders show the colored cells
    pub show_diagram: bool,
}

impl Default for StippleConfig {
    fn default() -> Self {
        StippleConfigBuilder::new().seed(0).into_config()
    }
}

/// Builder for [`StippleConfig`] with validation
#[derive(Debug, Clone)]
pub struct StippleConfigBuilder {
    seed: Option<u32>,
    point_count: usize,
    cone_radius: f32,
    cone_fragments: usize,
    convergence_threshold: f32,
    max_steps: Option<usize>,
    stipple_size: f32,
    stipple_color: Color,
    show_diagram: bool,
}

impl StippleConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - point_count: 30
    /// - cone_radius: 1500
    /// - cone_fragments: 50
    /// - convergence_threshold: 0.80 pixels
    /// - max_steps: unbounded
    /// - stipple_size: 2.5
    /// - stipple_color: black
    /// - show_diagram: true
    pub fn new() -> Self {
        Self {
            seed: None,
            point_count: 30,
            cone_radius: 1500.0,
            cone_fragments: 50,
            convergence_threshold: 0.80,
            max_steps: None,
            stipple_size: 2.5,
            stipple_color: Color::BLACK,
            show_diagram: true,
        }
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn point_count(mut self, count: usize) -> Self {
        self.point_count = count;
        self
    }

    /// Set the cone base radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the radius is positive and finite.
    pub fn cone_radius(mut self, radius: f32) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(StippleError::InvalidConfig(format!(
                "Cone radius must be positive (got {})",
                radius
            )));
        }
        self.cone_radius = radius;
        Ok(self)
    }

    /// Set the number of triangles per cone
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if fewer than 3 fragments are requested.
    pub fn cone_fragments(mut self, fragments: usize) -> Result<Self> {
        if fragments < 3 {
            return Err(StippleError::InvalidConfig(format!(
                "Cone needs at least 3 fragments (got {})",
                fragments
            )));
        }
        self.cone_fragments = fragments;
        Ok(self)
    }

    /// Set the maximum per-step displacement counted as converged
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the threshold is negative or not finite.
    pub fn convergence_threshold(mut self, threshold: f32) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(StippleError::InvalidConfig(format!(
                "Convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.convergence_threshold = threshold;
        Ok(self)
    }

    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Set the dot radius used when drawing stipples
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless the size is positive and finite.
    pub fn stipple_size(mut self, size: f32) -> Result<Self> {
        if !size.is_finite() || size <= 0.0 {
            return Err(StippleError::InvalidConfig(format!(
                "Stipple size must be positive (got {})",
                size
            )));
        }
        self.stipple_size = size;
        Ok(self)
    }

    pub fn stipple_color(mut self, color: Color) -> Self {
        self.stipple_color = color;
        self
    }

    pub fn show_diagram(mut self, show: bool) -> Self {
        self.show_diagram = show;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, a random one is drawn.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the point count is zero.
    pub fn build(self) -> Result<StippleConfig> {
        if self.point_count == 0 {
            return Err(StippleError::InvalidConfig(
                "Point count must be at least 1".to_string(),
            ));
        }
        Ok(self.into_config())
    }

    fn into_config(self) -> StippleConfig {
        StippleConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            point_count: self.point_count,
            cone_radius: self.cone_radius,
            cone_fragments: self.cone_fragments,
            convergence_threshold: self.convergence_threshold,
            max_steps: self.max_steps,
            stipple_size: self.stipple_size,
            stipple_color: self.stipple_color,
            show_diagram: self.show_diagram,
        }
    }
}

impl Default for StippleConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
