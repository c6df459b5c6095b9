//! Rasterized Voronoi diagram
//!
//! One cone per generating point is drawn into a depth-tested target. All
//! cones share radius and slope, so at every pixel the nearest apex leaves
//! the smallest depth and wins the depth test. The color left in each pixel
//! is therefore the color of the nearest point, and the image is the Voronoi
//! diagram at pixel resolution.
//!
//! Points on a cell boundary may go to either neighbour depending on
//! rasterization order. That is part of the approximation.

mod software;

pub use software::SoftwareTarget;

use glam::Vec2;
use image::RgbaImage;
use log::trace;

use crate::color::CLEAR_COLOR;
use crate::config::StippleConfig;
use crate::error::{Result, StippleError};
use crate::mesh::ConeMesh;
use crate::point::{Color, Point};

/// Background shown when the diagram is hidden from display
pub const HIDDEN_DIAGRAM_COLOR: Color = Color::WHITE;

/// Backend the diagram is rasterized into
///
/// Coordinates are surface pixels with the origin at the top-left corner and
/// y pointing down. Depth is `-z` of the translated vertex; a fragment is
/// kept when its depth is less than or equal to the stored depth.
pub trait RenderTarget {
    /// Surface size as `(width, height)` in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the color buffer with `color` and reset depth to the far plane
    fn clear(&mut self, color: Color);

    /// Rasterize a triangle list translated by `translation`, flat-shaded
    /// with `color`, under a less-or-equal depth test
    fn draw_triangles(&mut self, vertices: &[[f32; 3]], translation: Vec2, color: Color);

    /// Whole color buffer as RGBA8, bottom row first
    fn read_pixels(&self) -> Vec<u8>;
}

/// Surface row of the `row`-th readback row
///
/// Readback is bottom row first while surface and image coordinates are top
/// row first. The conversion is its own inverse. `row` must be `< height`.
#[inline]
pub fn readback_row_to_surface_y(row: u32, height: u32) -> u32 {
    height - 1 - row
}

/// Fail unless `pixels` is a full RGBA8 readback of a `width` x `height`
/// surface
pub fn check_readback(pixels: &[u8], width: u32, height: u32) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(StippleError::ReadbackMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Read `target` back into an image, top row first
pub fn readback_image<T>(target: &T) -> Result<RgbaImage>
where
    T: RenderTarget + ?Sized,
{
    let (width, height) = target.size();
    let pixels = target.read_pixels();
    check_readback(&pixels, width, height)?;

    let row_len = width as usize * 4;
    let mut flipped = Vec::with_capacity(pixels.len());
    for y in 0..height {
        let row = readback_row_to_surface_y(y, height) as usize;
        flipped.extend_from_slice(&pixels[row * row_len..(row + 1) * row_len]);
    }
    RgbaImage::from_raw(width, height, flipped).ok_or(StippleError::ReadbackMismatch {
        expected: row_len * height as usize,
        actual: pixels.len(),
    })
}

/// What a render is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// Offscreen render for centroid sampling; always uses true point colors
    Sampling,
    /// Render for presentation to the user
    Display {
        /// Draw the colored cells, or just the plain background
        show_diagram: bool,
    },
}

impl RenderPass {
    fn draws_cells(self) -> bool {
        match self {
            RenderPass::Sampling => true,
            RenderPass::Display { show_diagram } => show_diagram,
        }
    }
}

/// Draws generating points as depth-tested cones
///
/// Owns the shared cone mesh; targets are borrowed per call.
#[derive(Debug, Clone)]
pub struct VoronoiRenderer {
    mesh: ConeMesh,
}

impl VoronoiRenderer {
    pub fn new(mesh: ConeMesh) -> Self {
        Self { mesh }
    }

    /// Build the cone mesh described by `config`
    pub fn from_config(config: &StippleConfig) -> Result<Self> {
        Ok(Self::new(ConeMesh::new(
            config.cone_radius,
            config.cone_fragments,
        )?))
    }

    #[inline]
    pub fn mesh(&self) -> &ConeMesh {
        &self.mesh
    }

    /// True when a cone at `position` cannot reach a `width` x `height`
    /// surface
    pub fn is_culled(&self, position: Vec2, width: u32, height: u32) -> bool {
        let radius = self.mesh.radius();
        position.x > width as f32 + radius
            || position.x < -radius
            || position.y > height as f32 + radius
            || position.y < -radius
    }

    /// Clear `target` and draw one cone per point
    ///
    /// Returns how many cones were actually drawn.
    pub fn render<T>(&self, target: &mut T, points: &[Point], pass: RenderPass) -> usize
    where
        T: RenderTarget + ?Sized,
    {
        self.render_with_preview(target, points, None, pass)
    }

    /// Like [`render`](Self::render), with one extra untracked point drawn
    /// last, e.g. a point being placed interactively
    pub fn render_with_preview<T>(
        &self,
        target: &mut T,
        points: &[Point],
        preview: Option<&Point>,
        pass: RenderPass,
    ) -> usize
    where
        T: RenderTarget + ?Sized,
    {
        if !pass.draws_cells() {
            target.clear(HIDDEN_DIAGRAM_COLOR);
            return 0;
        }

        target.clear(CLEAR_COLOR);
        let (width, height) = target.size();

        let mut drawn = 0;
        for point in points.iter().chain(preview) {
            if self.is_culled(point.position, width, height) {
                continue;
            }
            target.draw_triangles(self.mesh.positions(), point.position, point.color);
            drawn += 1;
        }

        trace!(
            "rendered {} of {} cones ({:?})",
            drawn,
            points.len() + usize::from(preview.is_some()),
            pass
        );
        drawn
    }
}
