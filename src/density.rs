//! Density sampling for weighted stippling
//!
//! A density field turns a grayscale image into per-pixel weights. Darker
//! pixels weigh more, so centroids and therefore points drift toward dark
//! areas. Without a field every pixel weighs 1.

use image::{DynamicImage, GrayImage};

use crate::error::{Result, StippleError};

/// Weight of a pixel for which no density information exists
pub const UNIFORM_DENSITY: f32 = 1.0;

/// Trait for sampling density at surface pixels
pub trait DensitySampler {
    /// Weight in `[0, 1]` of the pixel at `(x, y)`, top-left origin
    ///
    /// Must not fail: coordinates outside the sampler's domain get
    /// [`UNIFORM_DENSITY`].
    fn density(&self, x: f32, y: f32) -> f32;
}

/// Same weight everywhere
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniformDensity;

impl DensitySampler for UniformDensity {
    #[inline]
    fn density(&self, _x: f32, _y: f32) -> f32 {
        UNIFORM_DENSITY
    }
}

/// Immutable grayscale sample grid, rows top first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityField {
    width: u32,
    height: u32,
    intensities: Vec<u8>,
}

impl DensityField {
    /// Wrap raw intensities, one byte per pixel
    ///
    /// # Errors
    ///
    /// Returns `InvalidDensityField` if `intensities.len() != width * height`.
    pub fn new(width: u32, height: u32, intensities: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if intensities.len() != expected {
            return Err(StippleError::InvalidDensityField(format!(
                "{}x{} field needs {} samples, got {}",
                width,
                height,
                expected,
                intensities.len()
            )));
        }
        Ok(Self {
            width,
            height,
            intensities,
        })
    }

    /// Field from an 8-bit grayscale image
    pub fn from_luma(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            intensities: image.into_raw(),
        }
    }

    /// Field from any decoded image, converted to grayscale first
    pub fn from_image(image: &DynamicImage) -> Self {
        Self::from_luma(image.to_luma8())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw intensity at `(x, y)`, or `None` outside the field
    pub fn intensity(&self, x: f32, y: f32) -> Option<u8> {
        if !(x >= 0.0 && y >= 0.0) {
            // Also catches NaN
            return None;
        }
        let (col, row) = (x.floor(), y.floor());
        if col >= self.width as f32 || row >= self.height as f32 {
            return None;
        }
        Some(self.intensities[row as usize * self.width as usize + col as usize])
    }
}

impl DensitySampler for DensityField {
    fn density(&self, x: f32, y: f32) -> f32 {
        match self.intensity(x, y) {
            Some(intensity) => 1.0 - f32::from(intensity) / 255.0,
            None => UNIFORM_DENSITY,
        }
    }
}

impl<S: DensitySampler> DensitySampler for Option<S> {
    fn density(&self, x: f32, y: f32) -> f32 {
        match self {
            Some(sampler) => sampler.density(x, y),
            None => UNIFORM_DENSITY,
        }
    }
}

impl<S: DensitySampler + ?Sized> DensitySampler for &S {
    fn density(&self, x: f32, y: f32) -> f32 {
        (**self).density(x, y)
    }
}
