//! Lloyd relaxation driven by rasterized Voronoi diagrams
//!
//! [`Stippler`] owns the generating points and steps them toward their cell
//! centroids, one render/readback/reduce cycle per step, until no point moves
//! further than the convergence threshold.
//!
//! # State machine
//!
//! ```text
//! Idle --start--> Running --converged--> Converged
//!                    |
//!                    +------stop-------> Stopped
//! ```
//!
//! `Converged` and `Stopped` are terminal for [`Stippler::tick`]; a new
//! `start` re-enters `Running` from any state.

mod lloyd;

pub use lloyd::{move_to_centroids, CentroidUpdate};

use glam::Vec2;
use image::RgbaImage;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

use crate::color::{
    assign_colors, unique_color, ColorMap, ColorScheme, RandomColors, SinusoidalColors,
};
use crate::config::StippleConfig;
use crate::density::DensityField;
use crate::error::{Result, StippleError};
use crate::point::{Color, Point};
use crate::render::{readback_image, RenderPass, RenderTarget, VoronoiRenderer};
use crate::stipple::{draw_stipples, StippleStyle};

/// Where a relaxation run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelaxationStatus {
    /// Nothing started yet
    #[default]
    Idle,
    /// Stepping on every tick
    Running,
    /// Last step moved no point further than the threshold
    Converged,
    /// Halted by `stop` or by the step cap
    Stopped,
}

/// Summary of one relaxation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// 1-based step number within the current run
    pub step: usize,
    /// Largest distance any point moved
    pub max_displacement: f32,
    /// Whether `max_displacement` is within the convergence threshold
    pub converged: bool,
    /// Points that received no weight and kept their position
    pub empty_cells: usize,
    /// Cones that survived culling
    pub cones_drawn: usize,
}

/// Generating points and the color map attributing pixels to them
///
/// Both halves are always replaced together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelaxationState {
    points: Vec<Point>,
    color_map: ColorMap,
}

impl RelaxationState {
    /// Pair `points` with a freshly built color map
    ///
    /// # Errors
    ///
    /// Returns `ColorCollision` if two points share a color.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        let color_map = ColorMap::from_points(&points)?;
        Ok(Self { points, color_map })
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }
}

/// Lloyd relaxation engine for Voronoi stippling
///
/// Single-owner and synchronous: every method runs to completion, and a
/// `stop` only takes effect before the next tick.
pub struct Stippler {
    config: StippleConfig,
    renderer: VoronoiRenderer,
    state: RelaxationState,
    status: RelaxationStatus,
    steps: usize,
    last_displacement: Option<f32>,
    density: Option<DensityField>,
    style: StippleStyle,
    show_diagram: bool,
    rng: ChaCha8Rng,
}

impl Stippler {
    /// Create an idle engine
    ///
    /// # Errors
    ///
    /// Returns `InvalidMesh` if the configured cone cannot be built.
    pub fn new(config: StippleConfig) -> Result<Self> {
        Ok(Self {
            renderer: VoronoiRenderer::from_config(&config)?,
            state: RelaxationState::default(),
            status: RelaxationStatus::Idle,
            steps: 0,
            last_displacement: None,
            density: None,
            style: StippleStyle {
                size: config.stipple_size,
                color: config.stipple_color,
            },
            show_diagram: config.show_diagram,
            rng: ChaCha8Rng::seed_from_u64(u64::from(config.seed)),
            config,
        })
    }

    /// Scatter `config.point_count` points over a `width` x `height` surface
    /// and start relaxing
    pub fn start(&mut self, width: u32, height: u32) -> Result<()> {
        self.start_with_count(self.config.point_count, width, height)
    }

    /// Scatter `count` points at random whole-pixel positions and start
    /// relaxing
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty surface, or `ColorCollision` if
    /// colors could not be made unique.
    pub fn start_with_count(&mut self, count: usize, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(StippleError::InvalidConfig(format!(
                "surface must be non-empty (got {}x{})",
                width, height
            )));
        }

        let positions: Vec<Vec2> = (0..count)
            .map(|_| {
                Vec2::new(
                    self.rng.gen_range(0..width) as f32,
                    self.rng.gen_range(0..height) as f32,
                )
            })
            .collect();

        self.start_with(&positions)
    }

    /// Start relaxing from the given positions
    ///
    /// Colors come from the sine palette; the previous state is discarded.
    pub fn start_with(&mut self, positions: &[Vec2]) -> Result<()> {
        self.start_with_scheme(positions, &mut SinusoidalColors::default())
    }

    /// Start relaxing from the given positions with colors from `scheme`
    pub fn start_with_scheme<S>(&mut self, positions: &[Vec2], scheme: &mut S) -> Result<()>
    where
        S: ColorScheme + ?Sized,
    {
        let (points, color_map) = assign_colors(positions, scheme)?;
        self.state = RelaxationState { points, color_map };
        self.status = RelaxationStatus::Running;
        self.steps = 0;
        self.last_displacement = None;

        info!("started relaxation with {} points", positions.len());
        Ok(())
    }

    /// Halt a running relaxation; no effect in any other state
    pub fn stop(&mut self) {
        if self.status == RelaxationStatus::Running {
            self.status = RelaxationStatus::Stopped;
            info!("relaxation stopped after {} steps", self.steps);
        }
    }

    /// Step once if running
    ///
    /// Returns `None` when not running. A run hitting `max_steps` is
    /// stopped before stepping further.
    pub fn tick<T>(&mut self, target: &mut T) -> Result<Option<StepReport>>
    where
        T: RenderTarget + ?Sized,
    {
        if self.status != RelaxationStatus::Running {
            return Ok(None);
        }
        if let Some(max_steps) = self.config.max_steps {
            if self.steps >= max_steps {
                self.status = RelaxationStatus::Stopped;
                info!("relaxation hit the {} step cap", max_steps);
                return Ok(None);
            }
        }
        self.step(target).map(Some)
    }

    /// Tick until the run leaves `Running`, returning the number of steps
    ///
    /// Without `max_steps` this only returns once converged.
    pub fn run<T>(&mut self, target: &mut T) -> Result<usize>
    where
        T: RenderTarget + ?Sized,
    {
        let first = self.steps;
        while self.tick(target)?.is_some() {}
        Ok(self.steps - first)
    }

    /// Move every point to the centroid of its cell, whatever the status
    ///
    /// A running relaxation whose step stays within the threshold becomes
    /// `Converged`.
    ///
    /// # Errors
    ///
    /// Returns `ReadbackMismatch` if the target reads back a buffer that
    /// does not match its size. The state is left untouched on error.
    pub fn step<T>(&mut self, target: &mut T) -> Result<StepReport>
    where
        T: RenderTarget + ?Sized,
    {
        let (width, height) = target.size();
        let cones_drawn = self
            .renderer
            .render(target, &self.state.points, RenderPass::Sampling);
        let pixels = target.read_pixels();

        let update = move_to_centroids(
            &pixels,
            width,
            height,
            &self.state.points,
            &self.state.color_map,
            &self.density,
        )?;
        let next = RelaxationState::new(update.points)?;
        self.state = next;

        self.steps += 1;
        self.last_displacement = Some(update.max_displacement);
        let converged = update.max_displacement <= self.config.convergence_threshold;

        debug!(
            "step {}: max_disp={:.4}, empty_cells={}, cones={}",
            self.steps, update.max_displacement, update.empty_cells, cones_drawn
        );

        if converged && self.status == RelaxationStatus::Running {
            self.status = RelaxationStatus::Converged;
            info!(
                "converged at step {} (max_disp {:.4} <= threshold {:.4})",
                self.steps, update.max_displacement, self.config.convergence_threshold
            );
        }

        Ok(StepReport {
            step: self.steps,
            max_displacement: update.max_displacement,
            converged,
            empty_cells: update.empty_cells,
            cones_drawn,
        })
    }

    /// Append a point, e.g. one placed by the user
    ///
    /// Without a color, a random one not used by any tracked point is
    /// picked. Given colors are made opaque. The color map is rebuilt.
    ///
    /// # Errors
    ///
    /// Returns `ColorCollision` if the color is already taken; the state is
    /// left untouched.
    pub fn add_point(&mut self, position: Vec2, color: Option<Color>) -> Result<Point> {
        let slot = self.state.points.len();
        let color = match color {
            Some(color) => color.to_opaque(),
            None => {
                let taken: HashSet<_> = self.state.color_map.keys().collect();
                let mut scheme = RandomColors::new(self.rng.gen());
                unique_color(&mut scheme, slot, &taken)?
            }
        };

        let point = Point { position, color };
        let mut points = self.state.points.clone();
        points.push(point);
        self.state = RelaxationState::new(points)?;

        debug!("added point {} at {:?} with color {}", slot, position, color);
        Ok(point)
    }

    /// Render the diagram for presentation, honouring `show_diagram`
    pub fn render_display<T>(&self, target: &mut T) -> usize
    where
        T: RenderTarget + ?Sized,
    {
        self.render_display_with_preview(target, None)
    }

    /// Render for presentation with an extra untracked point on top
    pub fn render_display_with_preview<T>(&self, target: &mut T, preview: Option<&Point>) -> usize
    where
        T: RenderTarget + ?Sized,
    {
        let pass = RenderPass::Display {
            show_diagram: self.show_diagram,
        };
        self.renderer
            .render_with_preview(target, &self.state.points, preview, pass)
    }

    /// Display render with the stipples drawn over it, as an image
    pub fn render_frame<T>(&self, target: &mut T) -> Result<RgbaImage>
    where
        T: RenderTarget + ?Sized,
    {
        self.render_display(target);
        let mut frame = readback_image(target)?;
        draw_stipples(&mut frame, &self.state.points, &self.style);
        Ok(frame)
    }

    #[inline]
    pub fn config(&self) -> &StippleConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &RelaxationState {
        &self.state
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.state.points
    }

    #[inline]
    pub fn status(&self) -> RelaxationStatus {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == RelaxationStatus::Running
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        self.status == RelaxationStatus::Converged
    }

    /// Steps taken since the last start
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Movement metric of the most recent step
    #[inline]
    pub fn last_displacement(&self) -> Option<f32> {
        self.last_displacement
    }

    /// Weight future steps by `field`, or uniformly for `None`
    pub fn set_density(&mut self, field: Option<DensityField>) {
        self.density = field;
    }

    #[inline]
    pub fn density(&self) -> Option<&DensityField> {
        self.density.as_ref()
    }

    #[inline]
    pub fn stipple_style(&self) -> &StippleStyle {
        &self.style
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` unless `size` is positive and finite.
    pub fn set_stipple_size(&mut self, size: f32) -> Result<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(StippleError::InvalidConfig(format!(
                "Stipple size must be positive (got {})",
                size
            )));
        }
        self.style.size = size;
        Ok(())
    }

    pub fn set_stipple_color(&mut self, color: Color) {
        self.style.color = color;
    }

    #[inline]
    pub fn show_diagram(&self) -> bool {
        self.show_diagram
    }

    /// Choose whether display renders show the colored cells
    ///
    /// Sampling always uses the true colors regardless.
    pub fn set_show_diagram(&mut self, show: bool) {
        self.show_diagram = show;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StippleConfigBuilder;
    use crate::render::SoftwareTarget;
    use approx::assert_abs_diff_eq;

    fn config() -> StippleConfigBuilder {
        StippleConfigBuilder::new()
            .seed(7)
            .cone_radius(100.0)
            .unwrap()
            .cone_fragments(32)
            .unwrap()
    }

    fn stippler() -> Stippler {
        Stippler::new(config().build().unwrap()).unwrap()
    }

    fn assert_bijection(stippler: &Stippler) {
        let state = stippler.state();
        assert!(state.color_map().is_consistent_with(state.points()));
        let keys: HashSet<_> = state.points().iter().map(|p| p.color.key()).collect();
        assert_eq!(keys.len(), state.points().len());
    }

    #[test]
    fn test_state_machine() {
        let mut stippler = stippler();
        let mut target = SoftwareTarget::new(32, 32).unwrap();
        assert_eq!(stippler.status(), RelaxationStatus::Idle);
        assert_eq!(stippler.tick(&mut target).unwrap(), None);

        stippler.start_with_count(6, 32, 32).unwrap();
        assert!(stippler.is_running());
        assert_eq!(stippler.points().len(), 6);

        assert!(stippler.tick(&mut target).unwrap().is_some());
        assert_eq!(stippler.steps(), 1);

        stippler.stop();
        assert_eq!(stippler.status(), RelaxationStatus::Stopped);
        assert_eq!(stippler.tick(&mut target).unwrap(), None);
        assert_eq!(stippler.steps(), 1);

        stippler.start_with_count(4, 32, 32).unwrap();
        assert!(stippler.is_running());
        assert_eq!(stippler.steps(), 0);
        assert_eq!(stippler.last_displacement(), None);
        assert_eq!(stippler.points().len(), 4);
    }

    #[test]
    fn test_stop_outside_running_is_ignored() {
        let mut stippler = stippler();
        stippler.stop();
        assert_eq!(stippler.status(), RelaxationStatus::Idle);
    }

    #[test]
    fn test_start_rejects_empty_surface() {
        let mut stippler = stippler();
        assert!(matches!(
            stippler.start_with_count(3, 0, 10),
            Err(StippleError::InvalidConfig(_))
        ));
        assert_eq!(stippler.status(), RelaxationStatus::Idle);
    }

    #[test]
    fn test_start_places_points_on_whole_pixels_inside_surface() {
        let mut stippler = stippler();
        stippler.start_with_count(50, 20, 10).unwrap();
        for p in stippler.points() {
            assert!(p.x() >= 0.0 && p.x() < 20.0 && p.x().fract() == 0.0);
            assert!(p.y() >= 0.0 && p.y() < 10.0 && p.y().fract() == 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_start() {
        let mut a = stippler();
        let mut b = stippler();
        a.start(64, 64).unwrap();
        b.start(64, 64).unwrap();
        assert_eq!(a.points(), b.points());
        assert_eq!(a.points().len(), 30);
    }

    #[test]
    fn test_bijection_holds_through_steps() {
        let mut stippler = stippler();
        let mut target = SoftwareTarget::new(32, 32).unwrap();
        stippler.start_with_count(10, 32, 32).unwrap();
        assert_bijection(&stippler);

        let colors: Vec<_> = stippler.points().iter().map(|p| p.color).collect();
        for _ in 0..3 {
            stippler.step(&mut target).unwrap();
            assert_bijection(&stippler);
        }
        let after: Vec<_> = stippler.points().iter().map(|p| p.color).collect();
        assert_eq!(colors, after);
    }

    #[test]
    fn test_two_point_centroids() {
        // Bisector at x = 15 splits a 40x20 surface into two rectangles
        let mut stippler = stippler();
        let mut target = SoftwareTarget::new(40, 20).unwrap();
        stippler
            .start_with(&[Vec2::new(5.0, 10.0), Vec2::new(25.0, 10.0)])
            .unwrap();

        let report = stippler.step(&mut target).unwrap();

        let left = stippler.points()[0].position;
        let right = stippler.points()[1].position;
        assert_abs_diff_eq!(left.x, 7.5, epsilon = 0.25);
        assert_abs_diff_eq!(left.y, 10.0, epsilon = 0.25);
        assert_abs_diff_eq!(right.x, 27.5, epsilon = 0.25);
        assert_abs_diff_eq!(right.y, 10.0, epsilon = 0.25);
        assert_abs_diff_eq!(report.max_displacement, 2.5, epsilon = 0.25);
        assert_eq!(report.cones_drawn, 2);
        assert_eq!(report.empty_cells, 0);
        assert!(!report.converged);
        assert!(stippler.is_running());
    }

    #[test]
    fn test_density_pulls_centroid_toward_dark_region() {
        let (width, height) = (40, 20);
        let positions = [Vec2::new(10.0, 10.0), Vec2::new(30.0, 10.0)];
        let mut target = SoftwareTarget::new(width, height).unwrap();

        let mut uniform = stippler();
        uniform.start_with(&positions).unwrap();
        uniform.step(&mut target).unwrap();

        // White everywhere except a dark 4x4 block in the left cell
        let mut intensities = vec![255u8; (width * height) as usize];
        for y in 2..6 {
            for x in 2..6 {
                intensities[(y * width + x) as usize] = 0;
            }
        }
        let mut weighted = stippler();
        weighted.set_density(Some(DensityField::new(width, height, intensities).unwrap()));
        weighted.start_with(&positions).unwrap();
        let report = weighted.step(&mut target).unwrap();

        let block_center = Vec2::new(4.0, 4.0);
        let pulled = weighted.points()[0].position;
        assert_abs_diff_eq!(pulled.x, 4.0, epsilon = 1e-4);
        assert_abs_diff_eq!(pulled.y, 4.0, epsilon = 1e-4);
        assert!(
            pulled.distance(block_center)
                < uniform.points()[0].position.distance(block_center)
        );

        // The right cell is weightless and stays put
        assert_eq!(weighted.points()[1].position, positions[1]);
        assert_eq!(report.empty_cells, 1);
    }

    #[test]
    fn test_converges_and_stays_converged() {
        let threshold = 0.80;
        let config = config()
            .convergence_threshold(threshold)
            .unwrap()
            .max_steps(200)
            .build()
            .unwrap();
        let mut stippler = Stippler::new(config).unwrap();
        let mut target = SoftwareTarget::new(48, 48).unwrap();

        stippler.start_with_count(8, 48, 48).unwrap();
        let steps = stippler.run(&mut target).unwrap();

        assert!(stippler.is_converged(), "not converged after {} steps", steps);
        assert!(steps >= 1 && steps < 200);
        assert!(stippler.last_displacement().unwrap() <= threshold);

        // A further step keeps every point within the threshold
        let before = stippler.points().to_vec();
        let report = stippler.step(&mut target).unwrap();
        assert!(report.max_displacement <= threshold);
        assert!(report.converged);
        for (old, new) in before.iter().zip(stippler.points()) {
            assert!(old.distance(new) <= threshold);
        }
        assert!(stippler.is_converged());
        assert_bijection(&stippler);
    }

    #[test]
    fn test_convergence_is_deterministic() {
        let run = || {
            let mut stippler = Stippler::new(config().max_steps(200).build().unwrap()).unwrap();
            let mut target = SoftwareTarget::new(32, 32).unwrap();
            stippler.start_with_count(5, 32, 32).unwrap();
            let steps = stippler.run(&mut target).unwrap();
            (steps, stippler.points().to_vec())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_step_cap_stops_run() {
        let config = config()
            .convergence_threshold(0.0)
            .unwrap()
            .max_steps(2)
            .build()
            .unwrap();
        let mut stippler = Stippler::new(config).unwrap();
        let mut target = SoftwareTarget::new(32, 32).unwrap();
        stippler
            .start_with(&[Vec2::new(1.0, 1.0), Vec2::new(2.0, 1.0), Vec2::new(1.0, 2.0)])
            .unwrap();

        let steps = stippler.run(&mut target).unwrap();
        assert_eq!(steps, 2);
        assert_eq!(stippler.status(), RelaxationStatus::Stopped);
    }

    #[test]
    fn test_zero_points_converge_immediately() {
        let mut stippler = stippler();
        let mut target = SoftwareTarget::new(8, 8).unwrap();
        stippler.start_with(&[]).unwrap();

        let report = stippler.tick(&mut target).unwrap().unwrap();
        assert_eq!(report.max_displacement, 0.0);
        assert_eq!(report.cones_drawn, 0);
        assert!(stippler.is_converged());
    }

    #[test]
    fn test_culled_point_keeps_position() {
        let mut stippler = stippler();
        let mut target = SoftwareTarget::new(16, 16).unwrap();
        let far = Vec2::new(500.0, 8.0);
        stippler.start_with(&[Vec2::new(8.0, 8.0), far]).unwrap();

        let report = stippler.step(&mut target).unwrap();
        assert_eq!(report.cones_drawn, 1);
        assert_eq!(report.empty_cells, 1);
        assert_eq!(stippler.points()[1].position, far);
        assert_abs_diff_eq!(stippler.points()[0].x(), 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_hidden_diagram_does_not_affect_sampling() {
        let positions = [Vec2::new(3.0, 4.0), Vec2::new(20.0, 9.0), Vec2::new(11.0, 28.0)];
        let mut target = SoftwareTarget::new(32, 32).unwrap();

        let mut shown = stippler();
        shown.start_with(&positions).unwrap();
        shown.step(&mut target).unwrap();

        let mut hidden = stippler();
        hidden.set_show_diagram(false);
        hidden.start_with(&positions).unwrap();
        hidden.render_display(&mut target);
        hidden.step(&mut target).unwrap();

        assert_eq!(shown.points(), hidden.points());
    }

    #[test]
    fn test_readback_mismatch_leaves_state_untouched() {
        struct Short(SoftwareTarget);

        impl RenderTarget for Short {
            fn size(&self) -> (u32, u32) {
                self.0.size()
            }
            fn clear(&mut self, color: Color) {
                self.0.clear(color)
            }
            fn draw_triangles(&mut self, vertices: &[[f32; 3]], translation: Vec2, color: Color) {
                self.0.draw_triangles(vertices, translation, color)
            }
            fn read_pixels(&self) -> Vec<u8> {
                vec![0; 4]
            }
        }

        let mut stippler = stippler();
        let mut target = Short(SoftwareTarget::new(8, 8).unwrap());
        stippler.start_with(&[Vec2::new(1.0, 1.0)]).unwrap();
        let before = stippler.state().clone();

        let err = stippler.step(&mut target).unwrap_err();
        assert!(matches!(err, StippleError::ReadbackMismatch { expected: 256, actual: 4 }));
        assert_eq!(stippler.state(), &before);
        assert_eq!(stippler.steps(), 0);
    }

    #[test]
    fn test_add_point_rebuilds_map() {
        let mut stippler = stippler();
        stippler.start_with_count(5, 32, 32).unwrap();

        let added = stippler.add_point(Vec2::new(3.0, 3.0), None).unwrap();
        assert_eq!(stippler.points().len(), 6);
        assert_eq!(stippler.points()[5], added);
        assert_eq!(added.color.a, 255);
        assert_bijection(&stippler);

        let custom = stippler
            .add_point(Vec2::new(9.0, 9.0), Some(Color::new(1, 2, 3, 10)))
            .unwrap();
        assert_eq!(custom.color, Color::opaque(1, 2, 3));
        assert_bijection(&stippler);
    }

    #[test]
    fn test_add_point_with_taken_color_fails_cleanly() {
        let mut stippler = stippler();
        stippler.start_with_count(3, 32, 32).unwrap();
        let before = stippler.state().clone();
        let taken = stippler.points()[1].color;

        let err = stippler.add_point(Vec2::ZERO, Some(taken)).unwrap_err();
        assert_eq!(
            err,
            StippleError::ColorCollision {
                key: taken.key(),
                slot: 3,
            }
        );
        assert_eq!(stippler.state(), &before);
    }

    #[test]
    fn test_render_frame_draws_stipples_over_hidden_diagram() {
        let config = config().show_diagram(false).build().unwrap();
        let mut stippler = Stippler::new(config).unwrap();
        stippler.set_stipple_color(Color::opaque(0, 0, 200));
        stippler.set_stipple_size(2.0).unwrap();
        stippler.start_with(&[Vec2::new(10.0, 10.0)]).unwrap();

        let mut target = SoftwareTarget::new(24, 24).unwrap();
        let frame = stippler.render_frame(&mut target).unwrap();

        assert_eq!(frame.get_pixel(10, 10).0, [0, 0, 200, 255]);
        assert_eq!(frame.get_pixel(20, 3).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_render_display_with_preview() {
        let mut stippler = stippler();
        stippler.start_with(&[Vec2::new(2.0, 2.0)]).unwrap();
        let preview = Point::new(14.0, 14.0, Color::opaque(9, 9, 9));

        let mut target = SoftwareTarget::new(16, 16).unwrap();
        let drawn = stippler.render_display_with_preview(&mut target, Some(&preview));
        assert_eq!(drawn, 2);
        assert_eq!(target.pixel(15, 15), preview.color);
        assert_eq!(stippler.points().len(), 1);
    }

    #[test]
    fn test_invalid_stipple_size() {
        let mut stippler = stippler();
        assert!(stippler.set_stipple_size(-1.0).is_err());
        assert_eq!(stippler.stipple_style().size, 2.5);
    }
}
