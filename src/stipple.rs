//! Stipple output
//!
//! Draws the generating points as filled dots, the visible result of a
//! stippling run.

use image::{Rgba, RgbaImage};

use crate::point::{Color, Point};

/// Appearance of the dots drawn for each point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StippleStyle {
    /// Dot radius in pixels
    pub size: f32,
    pub color: Color,
}

impl Default for StippleStyle {
    fn default() -> Self {
        Self {
            size: 2.5,
            color: Color::BLACK,
        }
    }
}

/// Fill a disc of `style.size` around every point
///
/// A pixel is painted when its center lies within the disc. Dots partly
/// outside the image are clipped.
pub fn draw_stipples(image: &mut RgbaImage, points: &[Point], style: &StippleStyle) {
    let (width, height) = image.dimensions();
    let fill: Rgba<u8> = style.color.into();
    let radius = style.size;
    let radius_sq = radius * radius;

    for point in points {
        let (cx, cy) = (point.x(), point.y());
        let min_x = (cx - radius).floor().max(0.0);
        let max_x = (cx + radius).ceil().min(width as f32);
        let min_y = (cy - radius).floor().max(0.0);
        let max_y = (cy + radius).ceil().min(height as f32);
        if min_x >= max_x || min_y >= max_y {
            continue;
        }

        for y in min_y as u32..max_y as u32 {
            for x in min_x as u32..max_x as u32 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= radius_sq {
                    image.put_pixel(x, y, fill);
                }
            }
        }
    }
}

/// Stipples on a plain background, e.g. for saving the result
pub fn render_stipples(
    width: u32,
    height: u32,
    background: Color,
    points: &[Point],
    style: &StippleStyle,
) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, background.into());
    draw_stipples(&mut image, points, style);
    image
}
