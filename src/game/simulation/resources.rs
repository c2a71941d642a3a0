/// Resource definitions for the simulation.
///
/// This module contains the fixed-point tuning configuration, the mutable
/// gravity state, the diagnostics flag and the tick counter.

use bevy::prelude::*;

use crate::game::geometry::{Rect, Size2};
use crate::game::math::{FixedNum, FixedNumU, FixedPoint2, FixedVec2};

// ============================================================================
// Simulation Configuration
// ============================================================================

/// Tuning constants for the physics step, converted once from
/// [`InitialConfig`](crate::game::config::InitialConfig) (floats) into fixed
/// point at startup.
///
/// Every coefficient must sit exactly on the 3-fractional-bit grid:
/// `from_num` rounds to nearest, so an off-grid value in the config file
/// silently becomes a neighbouring one (0.95 would become 1.0 and disable
/// friction entirely). The defaults here are the tuned, representable set.
#[derive(Resource, Clone, Debug)]
pub struct SimConfig {
    pub tick_rate: f64,
    /// Logical display size in pixels.
    pub screen: Size2,
    /// Side length of every body's square footprint.
    pub body_size: FixedNumU,
    /// Velocity retained per tick, in (0, 1).
    pub friction: FixedNum,
    /// Vertical speed retained across a gravity-mode floor bounce.
    pub restitution: FixedNum,
    /// Minimum impact speed that still produces a bounce. Must stay
    /// strictly above the numeric resolution or the rest branch becomes
    /// unreachable under quantization.
    pub restitution_threshold: FixedNum,
    /// Impulse contributed by one held directional control per tick.
    pub input_force: FixedNum,
    /// Whole-pixel speed range for freshly spawned bodies.
    pub spawn_speed: FixedNum,
    /// Velocity kick range for the shake action.
    pub shake_speed: FixedNum,
    /// Window pixels per logical pixel. Render-side only.
    pub pixel_scale: f32,
}

impl SimConfig {
    /// The region of valid body positions: a body's top-left corner may
    /// range over the screen minus one footprint in each axis.
    pub fn playfield(&self) -> Rect {
        Rect::new(
            FixedPoint2::ORIGIN,
            Size2::new(
                self.screen.width.wrapping_sub(self.body_size),
                self.screen.height.wrapping_sub(self.body_size),
            ),
        )
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            screen: Size2::new(FixedNumU::from_num(128), FixedNumU::from_num(64)),
            body_size: FixedNumU::from_num(8),
            friction: FixedNum::from_num(0.875),
            restitution: FixedNum::from_num(0.25),
            restitution_threshold: FixedNum::from_num(2.0),
            input_force: FixedNum::from_num(0.5),
            spawn_speed: FixedNum::from_num(3),
            shake_speed: FixedNum::from_num(8),
            pixel_scale: 6.0,
        }
    }
}

// ============================================================================
// Gravity State
// ============================================================================

/// The two boundary/friction regimes of the sandbox.
///
/// `Off` is an isotropic top-down world: drag on both axes, elastic bounces
/// off all four walls. `On` is a side-on gravity well: drag on the
/// horizontal axis only, damped vertical bounces with a rest cutoff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GravityMode {
    #[default]
    Off,
    On,
}

/// Controller-mutable gravity state: the mode flag and the force vector
/// added to every body's velocity each tick while the mode is `On`.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gravity {
    pub mode: GravityMode,
    pub force: FixedVec2,
}

impl Gravity {
    pub fn is_enabled(&self) -> bool {
        self.mode == GravityMode::On
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            GravityMode::Off => GravityMode::On,
            GravityMode::On => GravityMode::Off,
        };
    }

    /// Flip the gravity direction. Exact: negation in a two's-complement
    /// fixed format has no residual, so two inversions restore the
    /// original bit pattern.
    pub fn invert(&mut self) {
        self.force = -self.force;
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            mode: GravityMode::Off,
            force: FixedVec2::new(FixedNum::ZERO, FixedNum::from_num(0.5)),
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Diagnostic overlay settings.
#[derive(Resource, Default)]
pub struct DebugConfig {
    pub show_stats: bool,
}

/// Monotonic simulation tick counter.
#[derive(Resource, Default)]
pub struct SimTick(pub u64);
