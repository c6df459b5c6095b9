//! Voronoi stippling by cone rasterization and Lloyd relaxation
//!
//! Generating points are drawn as identical depth-tested cones, each in a
//! unique color. The nearest cone wins every pixel, so the rendered image is
//! the Voronoi diagram of the points. Reading it back gives each cell's
//! pixels, optionally weighted by an image's darkness, and moving every point
//! to its cell's weighted centroid (Lloyd's algorithm) spreads the points out
//! evenly, or in proportion to the image's tone.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use voronoi_stipple::*;
//!
//! let config = StippleConfigBuilder::new()
//!     .seed(42)
//!     .point_count(200)
//!     .max_steps(500)
//!     .build()
//!     .unwrap();
//!
//! let mut target = SoftwareTarget::new(320, 240).unwrap();
//! let mut stippler = Stippler::new(config).unwrap();
//! stippler.start(320, 240).unwrap();
//!
//! // One step per frame in an interactive host; here, run to the end
//! let steps = stippler.run(&mut target).unwrap();
//! println!("converged={} after {} steps", stippler.is_converged(), steps);
//! ```
//!
//! # Features
//!
//! - `serde`: Serialization for configuration, points and colors

// Modules
pub mod error;
pub mod config;
pub mod point;
pub mod mesh;
pub mod color;
pub mod render;
pub mod density;
pub mod relaxation;
pub mod stipple;

// Re-export core types for convenience
pub use error::{StippleError, Result};
pub use config::{StippleConfig, StippleConfigBuilder};
pub use point::{Color, ColorKey, Point};
pub use mesh::ConeMesh;
pub use color::{assign_colors, ColorMap, ColorScheme, RandomColors, SinusoidalColors, CLEAR_COLOR};
pub use render::{readback_row_to_surface_y, RenderPass, RenderTarget, SoftwareTarget, VoronoiRenderer};
pub use density::{DensityField, DensitySampler, UniformDensity};
pub use relaxation::{RelaxationState, RelaxationStatus, StepReport, Stippler};
pub use stipple::{draw_stipples, render_stipples, StippleStyle};

// Re-export glam::Vec2 for convenience
pub use glam::Vec2;
