//! A single orb: spawn, per-frame advance, and render

use crate::draw::DrawContext;
use crate::rand::OrbRng;
use orbfield_core::{GenerationParams, Hsl, Vec3, ZPhase};

/// The target number of frames per second.
pub const FPS: f64 = 60.0;
/// Reference frame interval in milliseconds at [`FPS`].
pub const FPMS: f64 = 1000.0 / FPS;

/// Base speed multiplier for the x and y axis
pub const XY_SPEED_BASE_RANGE: f64 = 8.0;
/// Base speed multiplier for the z axis
pub const Z_SPEED_BASE_RANGE: f64 = 1.5;

/// Far bound of the depth axis. Orbs shrink and blur as they approach it.
pub const MAX_Z: f64 = 10.0;
/// Near bound of the depth axis. Orbs grow and blur as they approach it.
pub const MIN_Z: f64 = -10.0;
pub const Z_RANGE: f64 = MAX_Z - MIN_Z;

/// Smallest radius handed to `arc`; zero or negative radii are illegal there.
pub const MIN_RADIUS: f64 = 0.0001;

/// Lower bound of the base radius range, before `max_orb_size` scaling
pub const MIN_BASE_SIZE: f64 = 15.0;
/// Upper bound of the base radius range at `max_orb_size == 1`
pub const MAX_BASE_SIZE: f64 = 23.0;

/// Oscillator time scale, radians per millisecond
const OSCILLATOR_RATE: f64 = 0.001;
/// Phase offsets are drawn from `[0, PHASE_SPAN)`
const PHASE_SPAN: f64 = 1000.0;

/// Blur per unit of depth for orbs on the positive side of the focal plane
const BLUR_POSITIVE_Z: f64 = 1.5;
/// Blur per unit of depth for orbs on the negative side of the focal plane
const BLUR_NEGATIVE_Z: f64 = 0.5;

/// Which way an orb currently travels along z
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZDirection {
    /// +1
    Closer,
    /// -1
    Further,
}

impl ZDirection {
    pub fn sign(self) -> f64 {
        match self {
            ZDirection::Closer => 1.0,
            ZDirection::Further => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ZDirection::Closer => ZDirection::Further,
            ZDirection::Further => ZDirection::Closer,
        }
    }
}

/// Per-frame motion inputs shared by every orb in a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Frame timestamp driving the oscillator
    pub elapsed_ms: f64,
    /// Frame interval divided by [`FPMS`]; 1.0 at exactly 60 FPS
    pub normalized_delta: f64,
    pub xy_speed: f64,
    pub z_depth: f64,
}

/// One simulated drifting circle
#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub position: Vec3,
    /// Recomputed from the oscillator every advance, never accumulated
    pub velocity: Vec3,
    pub phase_offset: Vec3,
    /// Base radius; the drawn radius also depends on `position.z`
    pub size: f64,
    pub z_direction: ZDirection,
    pub color: Hsl,
}

/// Off-screen margin before an orb wraps to the opposite edge.
///
/// Scales with the depth setting since depth changes apparent size. A depth
/// of zero still gets the base margin.
pub fn wrap_tolerance(z_depth: f64) -> f64 {
    let scale = if z_depth > 0.0 { z_depth } else { 1.0 };
    Z_RANGE * scale
}

impl Orb {
    /// Place a new orb uniformly on the surface with a center-biased depth
    pub fn spawn(
        width: f64,
        height: f64,
        params: &GenerationParams,
        z_phase: ZPhase,
        rng: &mut OrbRng,
    ) -> Self {
        // z = 0 is the focal plane, so start balanced around it. The spread
        // saturates at the full depth range rather than spilling past it.
        let spread = if params.z_depth.is_finite() {
            params.z_depth.abs().min(1.0)
        } else {
            0.0
        };
        let z = rng.balanced(Z_RANGE) * spread;
        let phase_z = match z_phase {
            ZPhase::Shared => 0.0,
            ZPhase::Independent => rng.range(0.0, PHASE_SPAN),
        };

        Self {
            position: Vec3::new(rng.range(0.0, width), rng.range(0.0, height), z),
            velocity: Vec3::ZERO,
            phase_offset: Vec3::new(rng.range(0.0, PHASE_SPAN), rng.range(0.0, PHASE_SPAN), phase_z),
            size: rng.range(MIN_BASE_SIZE, MAX_BASE_SIZE * params.max_orb_size),
            z_direction: if rng.coin() {
                ZDirection::Closer
            } else {
                ZDirection::Further
            },
            color: rng.hsl(&params.orb_color_range),
        }
    }

    /// Move the orb one frame.
    ///
    /// Velocity is a function of the frame timestamp and the orb's phase, so a
    /// slow frame produces one larger step rather than an error that compounds.
    pub fn advance(&mut self, step: &Step, width: f64, height: f64) {
        let nd = if step.normalized_delta.is_finite() {
            step.normalized_delta.max(0.0)
        } else {
            0.0
        };
        let t = step.elapsed_ms * OSCILLATOR_RATE;

        self.velocity = Vec3::new(
            (t + self.phase_offset.x).sin() * XY_SPEED_BASE_RANGE * nd * step.xy_speed,
            (t + self.phase_offset.y).cos() * XY_SPEED_BASE_RANGE * nd * step.xy_speed,
            (t + self.phase_offset.z).cos()
                * Z_SPEED_BASE_RANGE
                * nd
                * self.z_direction.sign()
                * step.z_depth,
        );
        if !self.velocity.is_finite() {
            self.velocity = Vec3::ZERO;
        }

        self.position += self.velocity;

        // Reverse at the depth limits and pin to the bound so z never runs away
        if self.position.z >= MAX_Z {
            self.position.z = MAX_Z;
            self.z_direction = self.z_direction.flipped();
        } else if self.position.z <= MIN_Z {
            self.position.z = MIN_Z;
            self.z_direction = self.z_direction.flipped();
        }

        let tolerance = wrap_tolerance(step.z_depth);
        self.position.x = wrap(self.position.x, width, tolerance);
        self.position.y = wrap(self.position.y, height, tolerance);
    }

    /// Blur radius in pixels; grows faster on the positive side of the focal plane
    pub fn blur_radius(&self) -> f64 {
        let z = self.position.z;
        if z > 0.0 {
            z.abs() * BLUR_POSITIVE_Z
        } else {
            z.abs() * BLUR_NEGATIVE_Z
        }
    }

    pub fn drawn_radius(&self) -> f64 {
        let radius = self.size + self.position.z;
        if radius > MIN_RADIUS {
            radius
        } else {
            MIN_RADIUS
        }
    }

    /// Set up the path and style for this orb. The caller commits with `fill`.
    pub fn render(&self, ctx: &mut dyn DrawContext) {
        ctx.set_blur(self.blur_radius());
        ctx.begin_path();
        ctx.arc(
            self.position.x,
            self.position.y,
            self.drawn_radius(),
            0.0,
            std::f64::consts::TAU,
        );
        ctx.set_fill_style(self.color);
        ctx.close_path();
    }
}

/// Wrap a coordinate into `[-tolerance, dimension + tolerance]`
fn wrap(value: f64, dimension: f64, tolerance: f64) -> f64 {
    if value >= -tolerance && value <= dimension + tolerance {
        return value;
    }
    let span = dimension + tolerance * 2.0;
    (value + tolerance).rem_euclid(span) - tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CommandRecorder, DrawCommand};
    use orbfield_core::SimulationParams;

    fn generation() -> GenerationParams {
        SimulationParams::default().generation()
    }

    fn still_orb(position: Vec3) -> Orb {
        Orb {
            position,
            velocity: Vec3::ZERO,
            phase_offset: Vec3::ZERO,
            size: 20.0,
            z_direction: ZDirection::Closer,
            color: Hsl::new(180.0, 30.0, 60.0),
        }
    }

    fn step(elapsed_ms: f64, normalized_delta: f64) -> Step {
        Step {
            elapsed_ms,
            normalized_delta,
            xy_speed: 1.0,
            z_depth: 1.0,
        }
    }

    #[test]
    fn spawn_within_surface_and_depth() {
        let mut rng = OrbRng::new(1);
        let params = GenerationParams {
            z_depth: 3.0,
            ..generation()
        };
        for _ in 0..500 {
            let orb = Orb::spawn(800.0, 600.0, &params, ZPhase::Shared, &mut rng);
            assert!((0.0..800.0).contains(&orb.position.x));
            assert!((0.0..600.0).contains(&orb.position.y));
            assert!(orb.position.z >= MIN_Z && orb.position.z <= MAX_Z);
            assert!(orb.size >= MIN_BASE_SIZE && orb.size < MAX_BASE_SIZE);
            assert_eq!(orb.phase_offset.z, 0.0);
            assert!(params.orb_color_range.h.contains(orb.color.h));
        }
    }

    #[test]
    fn spawn_depth_favors_focal_plane_at_high_depth() {
        let mut rng = OrbRng::new(1);
        let params = GenerationParams {
            z_depth: 3.0,
            ..generation()
        };
        let n = 10_000;
        let mut central = 0;
        let mut on_bound = 0;
        for _ in 0..n {
            let z = Orb::spawn(800.0, 600.0, &params, ZPhase::Shared, &mut rng).position.z;
            assert!(z >= MIN_Z && z <= MAX_Z);
            if z.abs() < 5.0 {
                central += 1;
            }
            if z == MIN_Z || z == MAX_Z {
                on_bound += 1;
            }
        }
        // Triangular over the full range: 75% in the middle half
        assert!(central as f64 / n as f64 > 0.7, "central {central}");
        assert!(on_bound < n / 100, "on bound {on_bound}");
    }

    #[test]
    fn spawn_depth_scales_below_one() {
        let mut rng = OrbRng::new(4);
        let params = GenerationParams {
            z_depth: 0.5,
            ..generation()
        };
        for _ in 0..1000 {
            let z = Orb::spawn(100.0, 100.0, &params, ZPhase::Shared, &mut rng).position.z;
            assert!(z.abs() <= MAX_Z * 0.5);
        }

        let flat = GenerationParams {
            z_depth: 0.0,
            ..generation()
        };
        let orb = Orb::spawn(100.0, 100.0, &flat, ZPhase::Shared, &mut rng);
        assert_eq!(orb.position.z, 0.0);
    }

    #[test]
    fn spawn_independent_phase_randomizes_z() {
        let mut rng = OrbRng::new(2);
        let nonzero = (0..50)
            .map(|_| Orb::spawn(100.0, 100.0, &generation(), ZPhase::Independent, &mut rng))
            .filter(|o| o.phase_offset.z != 0.0)
            .count();
        assert!(nonzero > 45);
    }

    #[test]
    fn spawn_size_scales_with_max_orb_size() {
        let mut rng = OrbRng::new(3);
        let params = GenerationParams {
            max_orb_size: 3.0,
            ..generation()
        };
        let largest = (0..500)
            .map(|_| Orb::spawn(100.0, 100.0, &params, ZPhase::Shared, &mut rng).size)
            .fold(0.0, f64::max);
        assert!(largest > MAX_BASE_SIZE);
        assert!(largest < MAX_BASE_SIZE * 3.0);
    }

    #[test]
    fn velocity_is_function_of_time_not_history() {
        let mut a = still_orb(Vec3::new(100.0, 100.0, 0.0));
        let mut b = a.clone();

        // b takes a detour through other timestamps first
        b.advance(&step(5000.0, 1.0), 1000.0, 1000.0);
        b.advance(&step(9000.0, 3.0), 1000.0, 1000.0);

        a.advance(&step(1234.0, 1.0), 1000.0, 1000.0);
        b.advance(&step(1234.0, 1.0), 1000.0, 1000.0);
        assert!((a.velocity.x - b.velocity.x).abs() < 1e-12);
        assert!((a.velocity.y - b.velocity.y).abs() < 1e-12);
    }

    #[test]
    fn velocity_matches_oscillator() {
        let mut orb = still_orb(Vec3::new(100.0, 100.0, 0.0));
        orb.phase_offset = Vec3::new(0.5, 0.25, 0.0);
        let s = Step {
            elapsed_ms: 2000.0,
            normalized_delta: 2.0,
            xy_speed: 3.0,
            z_depth: 1.0,
        };
        orb.advance(&s, 1000.0, 1000.0);

        let expected_x = (2.0_f64 + 0.5).sin() * 8.0 * 2.0 * 3.0;
        let expected_y = (2.0_f64 + 0.25).cos() * 8.0 * 2.0 * 3.0;
        assert!((orb.velocity.x - expected_x).abs() < 1e-9);
        assert!((orb.velocity.y - expected_y).abs() < 1e-9);
        assert!((orb.position.x - (100.0 + expected_x)).abs() < 1e-9);
    }

    #[test]
    fn zero_delta_is_no_motion() {
        let mut orb = still_orb(Vec3::new(50.0, 60.0, 2.0));
        let before = orb.position;
        orb.advance(&step(777.0, 0.0), 1000.0, 1000.0);
        assert_eq!(orb.position, before);
    }

    #[test]
    fn non_finite_delta_does_not_poison_state() {
        let mut orb = still_orb(Vec3::new(50.0, 60.0, 2.0));
        orb.advance(&step(777.0, f64::NAN), 1000.0, 1000.0);
        orb.advance(&step(778.0, f64::INFINITY), 1000.0, 1000.0);
        assert!(orb.position.is_finite());
        assert_eq!(orb.position, Vec3::new(50.0, 60.0, 2.0));
    }

    #[test]
    fn depth_reversal_at_bounds() {
        let mut orb = still_orb(Vec3::new(100.0, 100.0, MAX_Z - 0.1));
        orb.z_direction = ZDirection::Closer;
        // cos(0) = 1, so z moves by +1.5 * nd
        orb.advance(&step(0.0, 1.0), 1000.0, 1000.0);
        assert_eq!(orb.position.z, MAX_Z);
        assert_eq!(orb.z_direction, ZDirection::Further);

        let mut orb = still_orb(Vec3::new(100.0, 100.0, MIN_Z + 0.1));
        orb.z_direction = ZDirection::Further;
        orb.advance(&step(0.0, 1.0), 1000.0, 1000.0);
        assert_eq!(orb.position.z, MIN_Z);
        assert_eq!(orb.z_direction, ZDirection::Closer);
    }

    #[test]
    fn depth_stays_contained_over_many_frames() {
        let mut rng = OrbRng::new(11);
        let params = GenerationParams {
            z_depth: 3.0,
            ..generation()
        };
        let mut orbs: Vec<Orb> = (0..50)
            .map(|_| Orb::spawn(640.0, 480.0, &params, ZPhase::Independent, &mut rng))
            .collect();

        let mut t = 0.0;
        for frame in 0..2000 {
            // Mix of normal frames and hitches
            let nd = if frame % 97 == 0 { 12.0 } else { 1.0 };
            t += nd * FPMS;
            let s = Step {
                elapsed_ms: t,
                normalized_delta: nd,
                xy_speed: 10.0,
                z_depth: 3.0,
            };
            let tol = wrap_tolerance(3.0);
            for orb in &mut orbs {
                orb.advance(&s, 640.0, 480.0);
                assert!(orb.position.z >= MIN_Z && orb.position.z <= MAX_Z);
                assert!(orb.position.x >= -tol && orb.position.x <= 640.0 + tol);
                assert!(orb.position.y >= -tol && orb.position.y <= 480.0 + tol);
            }
        }
    }

    #[test]
    fn wraparound_left_edge() {
        let width = 800.0;
        let tol = wrap_tolerance(1.0);
        let mut orb = still_orb(Vec3::new(-tol - 1.0, 100.0, 0.0));
        let s = Step {
            xy_speed: 0.0,
            ..step(0.0, 1.0)
        };
        orb.advance(&s, width, 600.0);
        assert!((orb.position.x - (width + tol - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn wraparound_bottom_edge() {
        let height = 600.0;
        let tol = wrap_tolerance(2.0);
        let mut orb = still_orb(Vec3::new(100.0, height + tol + 5.0, 0.0));
        let s = Step {
            xy_speed: 0.0,
            z_depth: 2.0,
            ..step(0.0, 1.0)
        };
        orb.advance(&s, 800.0, height);
        assert!((orb.position.y - (-tol + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn wraparound_far_outside_lands_inside() {
        for value in [-5000.0, -141.0, 261.0, 1e6] {
            let v = wrap(value, 100.0, 20.0);
            assert!((-20.0..=120.0).contains(&v), "{value} wrapped to {v}");
        }
        assert_eq!(wrap(50.0, 100.0, 20.0), 50.0);
    }

    #[test]
    fn tolerance_uses_depth_or_base() {
        assert_eq!(wrap_tolerance(0.0), Z_RANGE);
        assert_eq!(wrap_tolerance(2.0), Z_RANGE * 2.0);
    }

    #[test]
    fn blur_is_asymmetric() {
        let far = still_orb(Vec3::new(0.0, 0.0, 4.0));
        let near = still_orb(Vec3::new(0.0, 0.0, -4.0));
        assert!((far.blur_radius() - 6.0).abs() < 1e-12);
        assert!((near.blur_radius() - 2.0).abs() < 1e-12);
        assert_eq!(still_orb(Vec3::ZERO).blur_radius(), 0.0);
    }

    #[test]
    fn drawn_radius_is_never_degenerate() {
        for size in [0.0, 0.5, 5.0, 20.0] {
            for z in [MIN_Z, -5.0, 0.0, 5.0, MAX_Z] {
                let mut orb = still_orb(Vec3::new(0.0, 0.0, z));
                orb.size = size;
                assert!(orb.drawn_radius() >= MIN_RADIUS);
            }
        }
        let mut orb = still_orb(Vec3::new(0.0, 0.0, -10.0));
        orb.size = 10.0;
        assert_eq!(orb.drawn_radius(), MIN_RADIUS);
    }

    #[test]
    fn render_sets_path_without_filling() {
        let orb = still_orb(Vec3::new(10.0, 20.0, 2.0));
        let mut ctx = CommandRecorder::new();
        orb.render(&mut ctx);

        assert_eq!(ctx.fill_count(), 0);
        let cmds = ctx.commands();
        assert_eq!(cmds[0], DrawCommand::SetBlur(3.0));
        assert_eq!(cmds[1], DrawCommand::BeginPath);
        assert_eq!(
            cmds[2],
            DrawCommand::Arc {
                x: 10.0,
                y: 20.0,
                radius: 22.0,
                start_angle: 0.0,
                end_angle: std::f64::consts::TAU,
            }
        );
        assert_eq!(cmds[3], DrawCommand::SetFillStyle(orb.color));
        assert_eq!(cmds[4], DrawCommand::ClosePath);
    }
}
