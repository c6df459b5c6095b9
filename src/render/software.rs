//! CPU triangle rasterizer with a depth buffer
//!
//! Pixels are sampled at their centers. A pixel is covered when all three
//! normalized edge functions are non-negative (with a small tolerance so that
//! centers lying exactly on an edge shared by two triangles are not dropped).
//! Depth is interpolated linearly across the triangle, as a GPU would for an
//! orthographic projection.

use glam::{Vec2, Vec3};

use super::{readback_row_to_surface_y, RenderTarget};
use crate::error::{Result, StippleError};
use crate::point::Color;

/// Barycentric slack for pixel centers on triangle edges
const EDGE_TOLERANCE: f32 = 1e-5;

/// Triangles with less area than this are skipped
const MIN_DOUBLE_AREA: f32 = 1e-8;

/// Depth-tested RGBA8 surface in main memory
#[derive(Debug, Clone)]
pub struct SoftwareTarget {
    width: u32,
    height: u32,
    /// Color buffer, top row first
    color: Vec<Color>,
    /// Depth buffer, top row first
    depth: Vec<f32>,
}

impl SoftwareTarget {
    /// Create a `width` x `height` surface cleared to black
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StippleError::InvalidConfig(format!(
                "render target must be non-empty (got {}x{})",
                width, height
            )));
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: vec![Color::BLACK; len],
            depth: vec![f32::INFINITY; len],
        })
    }

    /// Color at surface pixel `(x, y)`, top-left origin
    ///
    /// # Panics
    ///
    /// Panics if the pixel is outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.color[self.index(x, y)]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn rasterize(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, color: Color) {
        let double_area = edge(v0.truncate(), v1.truncate(), v2.truncate());
        if double_area.abs() < MIN_DOUBLE_AREA {
            return;
        }

        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0);
        let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(self.width as f32);
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0);
        let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(self.height as f32);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        let inv_area = 1.0 / double_area;
        for y in min_y as u32..max_y as u32 {
            for x in min_x as u32..max_x as u32 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(v1.truncate(), v2.truncate(), p) * inv_area;
                let w1 = edge(v2.truncate(), v0.truncate(), p) * inv_area;
                let w2 = edge(v0.truncate(), v1.truncate(), p) * inv_area;
                if w0 < -EDGE_TOLERANCE || w1 < -EDGE_TOLERANCE || w2 < -EDGE_TOLERANCE {
                    continue;
                }

                let depth = w0 * v0.z + w1 * v1.z + w2 * v2.z;
                let index = self.index(x, y);
                if depth <= self.depth[index] {
                    self.depth[index] = depth;
                    self.color[index] = color;
                }
            }
        }
    }
}

/// Twice the signed area of `(a, b, p)`
#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl RenderTarget for SoftwareTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.color.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    fn draw_triangles(&mut self, vertices: &[[f32; 3]], translation: Vec2, color: Color) {
        // Depth grows away from the viewer, i.e. with -z
        let place = |v: [f32; 3]| Vec3::new(v[0] + translation.x, v[1] + translation.y, -v[2]);
        for triangle in vertices.chunks_exact(3) {
            self.rasterize(place(triangle[0]), place(triangle[1]), place(triangle[2]), color);
        }
    }

    fn read_pixels(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.color.len() * 4);
        for row in 0..self.height {
            let y = readback_row_to_surface_y(row, self.height);
            for x in 0..self.width {
                let rgba: [u8; 4] = self.color[self.index(x, y)].into();
                pixels.extend_from_slice(&rgba);
            }
        }
        pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::opaque(255, 0, 0);
    const BLUE: Color = Color::opaque(0, 0, 255);

    fn full_quad(z: f32) -> Vec<[f32; 3]> {
        vec![
            [0.0, 0.0, z],
            [8.0, 0.0, z],
            [8.0, 8.0, z],
            [0.0, 0.0, z],
            [8.0, 8.0, z],
            [0.0, 8.0, z],
        ]
    }

    #[test]
    fn test_rejects_empty_surface() {
        assert!(SoftwareTarget::new(0, 4).is_err());
        assert!(SoftwareTarget::new(4, 0).is_err());
    }

    #[test]
    fn test_quad_covers_every_pixel() {
        let mut target = SoftwareTarget::new(8, 8).unwrap();
        target.draw_triangles(&full_quad(0.0), Vec2::ZERO, RED);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(target.pixel(x, y), RED);
            }
        }
    }

    #[test]
    fn test_nearer_triangle_wins_regardless_of_order() {
        let mut target = SoftwareTarget::new(8, 8).unwrap();
        target.draw_triangles(&full_quad(-1.0), Vec2::ZERO, RED);
        target.draw_triangles(&full_quad(-5.0), Vec2::ZERO, BLUE);
        assert_eq!(target.pixel(3, 3), RED);

        target.clear(Color::BLACK);
        target.draw_triangles(&full_quad(-5.0), Vec2::ZERO, BLUE);
        target.draw_triangles(&full_quad(-1.0), Vec2::ZERO, RED);
        assert_eq!(target.pixel(3, 3), RED);
    }

    #[test]
    fn test_equal_depth_later_draw_wins() {
        let mut target = SoftwareTarget::new(8, 8).unwrap();
        target.draw_triangles(&full_quad(-2.0), Vec2::ZERO, RED);
        target.draw_triangles(&full_quad(-2.0), Vec2::ZERO, BLUE);
        assert_eq!(target.pixel(4, 4), BLUE);
    }

    #[test]
    fn test_translation_moves_geometry() {
        let mut target = SoftwareTarget::new(8, 8).unwrap();
        let small = vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        target.draw_triangles(&small, Vec2::new(4.0, 4.0), RED);

        assert_eq!(target.pixel(4, 4), RED);
        assert_eq!(target.pixel(0, 0), Color::BLACK);
        assert_eq!(target.pixel(7, 7), Color::BLACK);
    }

    #[test]
    fn test_winding_does_not_matter() {
        let mut target = SoftwareTarget::new(8, 8).unwrap();
        let clockwise = vec![[0.0, 0.0, 0.0], [0.0, 8.0, 0.0], [8.0, 0.0, 0.0]];
        target.draw_triangles(&clockwise, Vec2::ZERO, RED);
        assert_eq!(target.pixel(1, 1), RED);
    }

    #[test]
    fn test_readback_is_bottom_row_first() {
        let mut target = SoftwareTarget::new(2, 3).unwrap();
        // Cover only the top surface row
        let top_row = vec![
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        target.draw_triangles(&top_row, Vec2::ZERO, RED);

        let pixels = target.read_pixels();
        assert_eq!(pixels.len(), 2 * 3 * 4);
        // Last readback row is the top surface row
        assert_eq!(&pixels[16..20], &[255, 0, 0, 255]);
        assert_eq!(&pixels[0..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_clear_resets_depth() {
        let mut target = SoftwareTarget::new(8, 8).unwrap();
        target.draw_triangles(&full_quad(0.0), Vec2::ZERO, RED);
        target.clear(Color::WHITE);
        assert_eq!(target.pixel(2, 2), Color::WHITE);

        target.draw_triangles(&full_quad(-100.0), Vec2::ZERO, BLUE);
        assert_eq!(target.pixel(2, 2), BLUE);
    }
}
