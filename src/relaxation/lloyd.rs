//! Centroid computation from a rasterized Voronoi diagram
//!
//! Every pixel of the readback is attributed to the point whose color it
//! carries. Weighted pixel centers are summed per point, and each point is
//! moved to the weighted mean of its cell.

use glam::{DVec2, Vec2};

use crate::color::ColorMap;
use crate::density::DensitySampler;
use crate::error::Result;
use crate::point::{Color, ColorKey, Point};
use crate::render::{check_readback, readback_row_to_surface_y};

/// Result of moving every point to its cell centroid
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidUpdate {
    /// New points, same order and colors as the input
    pub points: Vec<Point>,
    /// Largest distance any point moved
    pub max_displacement: f32,
    /// Points whose cell collected no weight and kept their position
    pub empty_cells: usize,
}

/// Running weighted sums for one cell
#[derive(Debug, Clone, Copy, Default)]
struct CellSums {
    weighted: DVec2,
    weight: f64,
}

impl CellSums {
    /// Weighted mean, or `None` for an empty cell
    fn centroid(&self) -> Option<Vec2> {
        (self.weight > 0.0).then(|| (self.weighted / self.weight).as_vec2())
    }
}

/// Move each point to the density-weighted centroid of its rasterized cell
///
/// `pixels` is a bottom-row-first RGBA8 readback of a `width` x `height`
/// surface. Pixel `(x, y)` contributes its center `(x + 0.5, y + 0.5)` with
/// weight `density(x, y)`, in top-left-origin surface coordinates. Pixels
/// whose color belongs to no tracked point are ignored. A cell with zero
/// total weight (fully occluded, culled, or entirely white under the density
/// field) keeps its previous position.
///
/// # Errors
///
/// Returns `ReadbackMismatch` if `pixels` does not hold `width * height`
/// RGBA pixels.
pub fn move_to_centroids<D>(
    pixels: &[u8],
    width: u32,
    height: u32,
    points: &[Point],
    color_map: &ColorMap,
    density: &D,
) -> Result<CentroidUpdate>
where
    D: DensitySampler + ?Sized,
{
    check_readback(pixels, width, height)?;

    let mut sums = vec![CellSums::default(); points.len()];
    let row_len = width as usize * 4;
    if row_len == 0 {
        return Ok(CentroidUpdate {
            points: points.to_vec(),
            max_displacement: 0.0,
            empty_cells: points.len(),
        });
    }

    // Neighbouring pixels mostly share a cell
    let mut cached: Option<(ColorKey, Option<usize>)> = None;

    for (row, row_pixels) in pixels.chunks_exact(row_len).enumerate() {
        let y = readback_row_to_surface_y(row as u32, height);
        for (x, px) in row_pixels.chunks_exact(4).enumerate() {
            // Readback alpha is not trusted; point colors are always opaque
            let key = Color::opaque(px[0], px[1], px[2]).key();
            let slot = match cached {
                Some((cached_key, slot)) if cached_key == key => slot,
                _ => {
                    let slot = color_map.lookup(key);
                    cached = Some((key, slot));
                    slot
                }
            };
            let Some(slot) = slot else {
                continue;
            };

            let w = f64::from(density.density(x as f32, y as f32));
            let center = DVec2::new(x as f64 + 0.5, f64::from(y) + 0.5);
            let cell = &mut sums[slot];
            cell.weighted += center * w;
            cell.weight += w;
        }
    }

    let mut max_displacement: f32 = 0.0;
    let mut empty_cells = 0;
    let mut new_points = Vec::with_capacity(points.len());

    for (old, cell) in points.iter().zip(&sums) {
        let position = match cell.centroid() {
            Some(centroid) => centroid,
            None => {
                empty_cells += 1;
                old.position
            }
        };

        let displacement = position.distance(old.position);
        if displacement > max_displacement {
            max_displacement = displacement;
        }
        new_points.push(old.moved_to(position));
    }

    Ok(CentroidUpdate {
        points: new_points,
        max_displacement,
        empty_cells,
    })
}
