/// Physics integration and collision response.
///
/// [`step_body`] advances one body by one tick through a fixed pipeline:
/// gravity, friction, horizontal bounce, vertical bounce, integration. The
/// order matters: every sub-step reads state the previous sub-steps
/// mutated. The two [`GravityMode`] regimes share this single path,
/// branching only in the friction and vertical sub-steps.

use bevy::prelude::*;

use crate::game::body::{Bodies, RigidBody};
use crate::game::math::FixedNum;
use crate::profile_log;

use super::resources::{Gravity, GravityMode, SimConfig, SimTick};

/// Advance every body by one tick and bump the tick counter.
pub fn step_bodies(
    mut bodies: ResMut<Bodies>,
    gravity: Res<Gravity>,
    config: Res<SimConfig>,
    mut tick: ResMut<SimTick>,
) {
    tick.0 += 1;
    for body in bodies.0.iter_mut() {
        step_body(body, &gravity, &config);
    }
    profile_log!(tick, "Stepped {} bodies at tick {}", bodies.0.len(), tick.0);
}

/// One tick of one body. Pure with respect to its inputs: the same body,
/// gravity state and config always produce the same result, bit for bit.
pub fn step_body(body: &mut RigidBody, gravity: &Gravity, config: &SimConfig) {
    let field = config.playfield();

    // 1. Gravity accelerates the body while the mode is on.
    if gravity.is_enabled() {
        body.velocity += gravity.force;
    }

    // 2. Friction. Under gravity only horizontal motion is damped here;
    // vertical energy is shed by restitution at the floor instead.
    match gravity.mode {
        GravityMode::On => {
            body.velocity.x = body.velocity.x.wrapping_mul(config.friction);
        }
        GravityMode::Off => {
            body.velocity = body.velocity * config.friction;
        }
    }

    // 3. Horizontal walls are perfectly elastic in both modes.
    if body.position.x < field.left() {
        body.position.x = field.left();
        body.velocity.x = body.velocity.x.wrapping_neg();
    } else if body.position.x > field.right() {
        body.position.x = field.right();
        body.velocity.x = body.velocity.x.wrapping_neg();
    }

    // 4. Vertical walls depend on the regime.
    match gravity.mode {
        GravityMode::On => {
            // Closed comparisons: a body resting exactly on the bound must
            // re-enter this branch every tick so the rest cutoff can absorb
            // the gravity impulse just added in sub-step 1.
            if body.position.y >= field.bottom() {
                body.position.y = field.bottom();
                if body.velocity.y > config.restitution_threshold {
                    body.velocity.y = body.velocity.y.wrapping_mul(config.restitution).wrapping_neg();
                } else if body.velocity.y >= FixedNum::ZERO {
                    // Too slow to bounce: the body is at rest on this bound.
                    // A departing (negative) velocity is left untouched.
                    body.velocity.y = FixedNum::ZERO;
                }
            } else if body.position.y <= field.top() {
                body.position.y = field.top();
                if body.velocity.y.wrapping_neg() > config.restitution_threshold {
                    body.velocity.y = body.velocity.y.wrapping_mul(config.restitution).wrapping_neg();
                } else if body.velocity.y <= FixedNum::ZERO {
                    body.velocity.y = FixedNum::ZERO;
                }
            }
        }
        GravityMode::Off => {
            // Elastic everywhere, mirroring the horizontal walls.
            if body.position.y < field.top() {
                body.position.y = field.top();
                body.velocity.y = body.velocity.y.wrapping_neg();
            } else if body.position.y > field.bottom() {
                body.position.y = field.bottom();
                body.velocity.y = body.velocity.y.wrapping_neg();
            }
        }
    }

    // 5. Explicit Euler integration, one tick = one time unit.
    body.position += body.velocity;
}
