//! Geometric primitives: generating points and their identifying colors

use glam::Vec2;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packed RGBA32 color key (`0xRRGGBBAA`)
///
/// This is the identifier a rendered pixel carries back to the generating
/// point that owns it.
pub type ColorKey = u32;

/// Largest channel value
const MAX_VALUE: f32 = 255.0;

/// RGBA color with channels in `[0, 255]`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::opaque(0, 0, 0);
    pub const WHITE: Color = Color::opaque(255, 255, 255);

    /// Create a color from four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Canonical mapping key, one byte per channel in RGBA order
    #[inline]
    pub const fn key(self) -> ColorKey {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Inverse of [`Color::key`]
    #[inline]
    pub const fn from_key(key: ColorKey) -> Self {
        let [r, g, b, a] = key.to_be_bytes();
        Self::new(r, g, b, a)
    }

    /// Same color with the alpha channel forced to 255
    #[inline]
    pub const fn to_opaque(self) -> Self {
        Self::opaque(self.r, self.g, self.b)
    }

    /// Channels normalized to `[0, 1]`
    pub fn normalized(self) -> [f32; 4] {
        [
            self.r as f32 / MAX_VALUE,
            self.g as f32 / MAX_VALUE,
            self.b as f32 / MAX_VALUE,
            self.a as f32 / MAX_VALUE,
        ]
    }

    /// One normalized color per vertex, for backends that take a per-vertex
    /// color attribute instead of a flat uniform
    pub fn vertex_colors(self, vertex_count: usize) -> Vec<[f32; 4]> {
        vec![self.normalized(); vertex_count]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba(color.into())
    }
}

/// A generating point: a surface position plus the color that identifies
/// its Voronoi cell in the rasterized diagram
///
/// Points have no persistent id. Identity is the slot they occupy in the
/// engine's ordered point list, and a relaxation step produces new values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Position in surface pixel units, y pointing down
    pub position: Vec2,
    /// Cell identifier color
    pub color: Color,
}

impl Point {
    /// Create a point at `(x, y)` with the given color
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: Vec2::new(x, y),
            color,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Same color, new position
    #[inline]
    pub fn moved_to(&self, position: Vec2) -> Self {
        Self {
            position,
            color: self.color,
        }
    }

    /// Euclidean distance between the two positions
    #[inline]
    pub fn distance(&self, other: &Point) -> f32 {
        self.position.distance(other.position)
    }
}
