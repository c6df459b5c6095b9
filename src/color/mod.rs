//! Color assignment for generating points
//!
//! Each point gets a unique color so the rasterized diagram can be mapped
//! back to the point owning every pixel.

mod map;

pub use map::ColorMap;

use glam::Vec2;
use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use crate::error::{Result, StippleError};
use crate::point::{Color, ColorKey, Point};

/// Color the render target is cleared to
///
/// Pixels no cone reaches keep this color, so no point may use it.
pub const CLEAR_COLOR: Color = Color::BLACK;

/// How many times a slot's color is regenerated before giving up
pub const MAX_COLOR_ATTEMPTS: usize = 16;

/// Source of point colors
pub trait ColorScheme {
    /// Color for the point at `index`
    ///
    /// `attempt` is 0 on the first request and increases each time the
    /// previous color for this index was rejected as a duplicate.
    fn color_for(&mut self, index: usize, attempt: usize) -> Color;
}

/// Deterministic sine-wave palette
///
/// Three channels are sine waves of the point index at unrelated
/// frequencies, which keeps neighbouring indices far apart in color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinusoidalColors {
    pub red_frequency: f64,
    pub green_frequency: f64,
    pub blue_frequency: f64,
}

impl SinusoidalColors {
    const CENTER: f64 = 128.0;
    const WIDTH: f64 = 127.0;
    /// Index stride applied per retry; far from any index in use
    const RETRY_STRIDE: usize = 7919;

    fn channel(frequency: f64, index: usize) -> u8 {
        // sin in [-1, 1] keeps the result within [1, 255]
        ((frequency * index as f64).sin() * Self::WIDTH + Self::CENTER).floor() as u8
    }
}

impl Default for SinusoidalColors {
    fn default() -> Self {
        Self {
            red_frequency: 1.666,
            green_frequency: 2.666,
            blue_frequency: 3.666,
        }
    }
}

impl ColorScheme for SinusoidalColors {
    fn color_for(&mut self, index: usize, attempt: usize) -> Color {
        let i = index + attempt * Self::RETRY_STRIDE;
        Color::opaque(
            Self::channel(self.red_frequency, i),
            Self::channel(self.green_frequency, i),
            Self::channel(self.blue_frequency, i),
        )
    }
}

/// Uniformly random opaque colors, no uniqueness guarantee on their own
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: ChaCha8Rng,
}

impl RandomColors {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ColorScheme for RandomColors {
    fn color_for(&mut self, _index: usize, _attempt: usize) -> Color {
        Color::opaque(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }
}

/// Pick a color for slot `index` that is not in `taken`
///
/// Colors are forced opaque, since readback keys always carry alpha 255.
pub(crate) fn unique_color<S>(
    scheme: &mut S,
    index: usize,
    taken: &HashSet<ColorKey>,
) -> Result<Color>
where
    S: ColorScheme + ?Sized,
{
    let mut last_key = 0;
    for attempt in 0..MAX_COLOR_ATTEMPTS {
        let color = scheme.color_for(index, attempt).to_opaque();
        let key = color.key();
        if key != CLEAR_COLOR.key() && !taken.contains(&key) {
            return Ok(color);
        }
        warn!("color {} for point {} is taken, regenerating", color, index);
        last_key = key;
    }
    Err(StippleError::ColorCollision {
        key: last_key,
        slot: index,
    })
}

/// Give every position a unique color and build the matching [`ColorMap`]
///
/// Duplicates are regenerated up to [`MAX_COLOR_ATTEMPTS`] times per point.
///
/// # Errors
///
/// Returns `ColorCollision` if a point still has no unique color after
/// the retries. The caller may retry with another scheme.
pub fn assign_colors<S>(positions: &[Vec2], scheme: &mut S) -> Result<(Vec<Point>, ColorMap)>
where
    S: ColorScheme + ?Sized,
{
    let mut taken = HashSet::with_capacity(positions.len());
    let mut points = Vec::with_capacity(positions.len());

    for (index, &position) in positions.iter().enumerate() {
        let color = unique_color(scheme, index, &taken)?;
        taken.insert(color.key());
        points.push(Point { position, color });
    }

    let map = ColorMap::from_points(&points)?;
    Ok((points, map))
}
