//! Cone mesh generation
//!
//! Every generating point is drawn as the same cone, apex at the point and
//! opening away from the viewer. Depth along the cone grows linearly with
//! distance from the apex, so whichever apex is nearest a pixel leaves the
//! smallest depth there. The mesh is built once and translated per point at
//! draw time; it is never re-tessellated.

use crate::error::{Result, StippleError};

/// Half-angle of the cone at its apex, in degrees
pub const CONE_HALF_ANGLE_DEG: f64 = 45.0;

/// Vertices emitted per triangle (apex + two base vertices)
pub const VERTICES_PER_TRIANGLE: usize = 3;

/// Immutable triangle list approximating a cone
///
/// Triangle `k` is the apex `(0, 0, 0)` followed by the base circle vertices
/// at `k * 360 / fragments` and `(k + 1) * 360 / fragments` degrees, both at
/// depth `-radius / tan(45°)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConeMesh {
    radius: f32,
    height: f32,
    fragments: usize,
    positions: Vec<[f32; 3]>,
}

impl ConeMesh {
    /// Tessellate a cone of base `radius` into `fragments` triangles
    ///
    /// # Errors
    ///
    /// Returns `InvalidMesh` if `fragments` is zero or `radius` is not a
    /// positive finite number.
    pub fn new(radius: f32, fragments: usize) -> Result<Self> {
        if fragments == 0 {
            return Err(StippleError::InvalidMesh(
                "cone needs at least one fragment".to_string(),
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(StippleError::InvalidMesh(format!(
                "cone radius must be positive (got {})",
                radius
            )));
        }

        let radius_f64 = f64::from(radius);
        let deg_inc = 360.0 / fragments as f64;
        let height = radius_f64 / CONE_HALF_ANGLE_DEG.to_radians().tan();

        let mut positions = Vec::with_capacity(fragments * VERTICES_PER_TRIANGLE);
        for k in 0..fragments {
            positions.push([0.0, 0.0, 0.0]);
            for j in 0..VERTICES_PER_TRIANGLE - 1 {
                let angle = ((k + j) as f64 * deg_inc).to_radians();
                positions.push([
                    (radius_f64 * angle.cos()) as f32,
                    (radius_f64 * angle.sin()) as f32,
                    (-height) as f32,
                ]);
            }
        }

        Ok(Self {
            radius,
            height: height as f32,
            fragments,
            positions,
        })
    }

    /// Base radius in surface pixel units
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Distance from apex to base plane
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of angular subdivisions (one triangle each)
    #[inline]
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Vertex positions, three per triangle
    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_TRIANGLE
    }
}
