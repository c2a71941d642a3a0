//! Force/mode controller: folds the input snapshot into the simulation.
//!
//! Runs once per tick, strictly before the physics step. The modifier key
//! selects between two mutually exclusive modes: held, single-press edges
//! fire one-shot actions (shake, gravity toggle, gravity inversion, stats
//! overlay); released, the directional keys accumulate a force on the
//! player body and the action key's rising edge is an emergency stop.
//!
//! The controller mutates nothing but the gravity state, the stats flag and
//! body 0's velocity. Every branch is a total, deterministic mutation.

use bevy::prelude::*;

use crate::game::body::Bodies;
use crate::game::config::{GameConfig, GameConfigHandle};
use crate::game::math::FixedVec2;
use crate::game::simulation::{DebugConfig, Gravity, SimConfig, SimSet};

pub struct ControlPlugin;

impl Plugin for ControlPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, handle_input.in_set(SimSet::Input));
    }
}

fn handle_input(
    keys: Res<ButtonInput<KeyCode>>,
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    sim_config: Res<SimConfig>,
    mut gravity: ResMut<Gravity>,
    mut debug_config: ResMut<DebugConfig>,
    mut bodies: ResMut<Bodies>,
) {
    let Some(config) = game_configs.get(&config_handle.0) else { return };

    if keys.pressed(config.key_modifier) {
        if keys.just_pressed(config.key_action) {
            bodies.shake(&sim_config, &mut rand::rng());
            info!("Shake: re-scattered all bodies");
        }
        if keys.just_pressed(config.key_up) {
            gravity.toggle();
            info!("Gravity {}", if gravity.is_enabled() { "enabled" } else { "disabled" });
        }
        if keys.just_pressed(config.key_down) {
            gravity.invert();
            info!("Gravity inverted: {:?}", gravity.force);
        }
        if keys.just_pressed(config.key_right) {
            debug_config.show_stats = !debug_config.show_stats;
            info!("Stats overlay: {}", debug_config.show_stats);
        }
        return;
    }

    // Directional keys sum into one force; opposing keys cancel.
    let mut force = FixedVec2::ZERO;
    if keys.pressed(config.key_left) {
        force.x -= sim_config.input_force;
    }
    if keys.pressed(config.key_right) {
        force.x += sim_config.input_force;
    }
    if keys.pressed(config.key_up) {
        force.y -= sim_config.input_force;
    }
    if keys.pressed(config.key_down) {
        force.y += sim_config.input_force;
    }
    if force != FixedVec2::ZERO {
        bodies.player_mut().apply_force(force);
    }

    if keys.just_pressed(config.key_action) {
        bodies.player_mut().velocity = FixedVec2::ZERO;
        info!("Emergency stop");
    }
}
