//! Rigid bodies: the simulated population and its visuals.
//!
//! The sandbox owns exactly [`BODY_COUNT`] bodies for the lifetime of the
//! process. Slot [`PLAYER_INDEX`] is the player-controlled body; every code
//! path reaches it through that index, so there is no second handle to drift
//! out of sync.

use bevy::prelude::*;
use rand::Rng;

use crate::game::geometry::{Rect, Size2};
use crate::game::math::{FixedNum, FixedPoint2, FixedVec2};
use crate::game::simulation::{init_sim_config_from_initial, SimConfig};

pub const BODY_COUNT: usize = 8;
pub const PLAYER_INDEX: usize = 0;

/// A strictly positive mass. Construction is the only place the invariant
/// is checked, which keeps [`RigidBody::apply_force`] total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mass(FixedNum);

impl Mass {
    pub const ONE: Self = Self(FixedNum::ONE);

    pub fn new(value: FixedNum) -> Option<Self> {
        (value > FixedNum::ZERO).then_some(Self(value))
    }

    pub const fn get(self) -> FixedNum {
        self.0
    }
}

impl Default for Mass {
    fn default() -> Self {
        Self::ONE
    }
}

/// One simulated point mass with an axis-aligned square footprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RigidBody {
    pub position: FixedPoint2,
    pub velocity: FixedVec2,
    pub mass: Mass,
}

impl RigidBody {
    pub fn new(position: FixedPoint2) -> Self {
        Self { position, velocity: FixedVec2::ZERO, mass: Mass::ONE }
    }

    /// Impulse application: velocity += force / mass.
    pub fn apply_force(&mut self, force: FixedVec2) {
        self.velocity += force / self.mass.get();
    }

    /// The body's square footprint, anchored at its position.
    pub fn footprint(&self, size: Size2) -> Rect {
        Rect::new(self.position, size)
    }
}

/// The fixed-size body population. Index [`PLAYER_INDEX`] is the player.
#[derive(Resource, Clone, Debug)]
pub struct Bodies(pub [RigidBody; BODY_COUNT]);

impl Bodies {
    /// Spawn the population with randomized positions across the playfield
    /// and randomized whole-pixel velocities.
    pub fn scattered<R: Rng>(config: &SimConfig, rng: &mut R) -> Self {
        let field = config.playfield();
        let speed: i32 = config.spawn_speed.to_num();
        let mut bodies = [RigidBody::default(); BODY_COUNT];
        for body in &mut bodies {
            *body = RigidBody::new(random_position(&field, rng));
            body.velocity = FixedVec2::new(
                FixedNum::from_num(rng.random_range(-speed..=speed)),
                FixedNum::from_num(rng.random_range(-speed..=speed)),
            );
        }
        Self(bodies)
    }

    /// Re-randomize every position and kick every velocity by a random
    /// offset spanning the full fractional grid up to the shake speed.
    pub fn shake<R: Rng>(&mut self, config: &SimConfig, rng: &mut R) {
        let field = config.playfield();
        let kick = config.shake_speed.to_bits();
        for body in &mut self.0 {
            body.position = random_position(&field, rng);
            body.velocity += FixedVec2::new(
                FixedNum::from_bits(rng.random_range(-kick..=kick)),
                FixedNum::from_bits(rng.random_range(-kick..=kick)),
            );
        }
    }

    pub fn player(&self) -> &RigidBody {
        &self.0[PLAYER_INDEX]
    }

    pub fn player_mut(&mut self) -> &mut RigidBody {
        &mut self.0[PLAYER_INDEX]
    }
}

fn random_position<R: Rng>(field: &Rect, rng: &mut R) -> FixedPoint2 {
    let min_x: i32 = field.left().to_num();
    let max_x: i32 = field.right().to_num();
    let min_y: i32 = field.top().to_num();
    let max_y: i32 = field.bottom().to_num();
    FixedPoint2::new(
        FixedNum::from_num(rng.random_range(min_x..=max_x)),
        FixedNum::from_num(rng.random_range(min_y..=max_y)),
    )
}

// ============================================================================
// Visuals
// ============================================================================

/// Sprite marker tying a display entity to its slot in [`Bodies`].
#[derive(Component)]
pub struct BodyIndex(pub usize);

pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_bodies.after(init_sim_config_from_initial))
            .add_systems(Update, (sync_body_sprites, draw_player_outline));
    }
}

fn setup_bodies(mut commands: Commands, config: Res<SimConfig>) {
    let mut rng = rand::rng();
    let bodies = Bodies::scattered(&config, &mut rng);
    info!(
        "Scattered {} bodies across a {}x{} playfield",
        BODY_COUNT,
        config.screen.width.to_num::<f32>(),
        config.screen.height.to_num::<f32>()
    );

    // The player is drawn as an outline gizmo instead of a sprite.
    let side = config.body_size.to_num::<f32>() * config.pixel_scale;
    for index in 0..BODY_COUNT {
        if index == PLAYER_INDEX {
            continue;
        }
        commands.spawn((
            Sprite::from_color(Color::WHITE, Vec2::splat(side)),
            Transform::from_translation(to_world(bodies.0[index].position, &config).extend(0.0)),
            BodyIndex(index),
        ));
    }
    commands.insert_resource(bodies);
}

fn sync_body_sprites(
    bodies: Res<Bodies>,
    config: Res<SimConfig>,
    mut query: Query<(&mut Transform, &BodyIndex)>,
) {
    for (mut transform, index) in query.iter_mut() {
        transform.translation = to_world(bodies.0[index.0].position, &config).extend(0.0);
    }
}

fn draw_player_outline(bodies: Res<Bodies>, config: Res<SimConfig>, mut gizmos: Gizmos) {
    let side = config.body_size.to_num::<f32>() * config.pixel_scale;
    gizmos.rect_2d(
        Isometry2d::from_translation(to_world(bodies.player().position, &config)),
        Vec2::splat(side),
        Color::WHITE,
    );
}

/// Map a body's top-left logical position to window space: logical pixels
/// are upscaled, the origin moves to the screen center and +y flips upward.
pub fn to_world(position: FixedPoint2, config: &SimConfig) -> Vec2 {
    let half_body = config.body_size.to_num::<f32>() / 2.0;
    let width: f32 = config.screen.width.to_num();
    let height: f32 = config.screen.height.to_num();
    let p = position.to_vec2();
    Vec2::new(
        p.x + half_body - width / 2.0,
        height / 2.0 - (p.y + half_body),
    ) * config.pixel_scale
}
