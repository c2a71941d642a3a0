/// Configuration initialization systems
///
/// Systems that handle loading and updating simulation configuration from:
/// - InitialConfig (loaded at startup from initial_config.ron)
/// - GameConfig (hot-reloadable key bindings from sandbox_config.ron)

use bevy::prelude::*;

use crate::game::config::{GameConfig, GameConfigHandle, InitialConfig};
use crate::game::geometry::Size2;
use crate::game::math::{FixedNum, FixedNumU, FixedVec2};

use super::resources::{Gravity, SimConfig};

/// Initialize SimConfig (and the gravity vector) from InitialConfig at
/// startup. This is the single float-to-fixed conversion point; everything
/// downstream of it works on the fixed-point grid.
pub fn init_sim_config_from_initial(
    mut fixed_time: ResMut<Time<Fixed>>,
    mut sim_config: ResMut<SimConfig>,
    mut gravity: ResMut<Gravity>,
    initial_config: Option<Res<InitialConfig>>,
) {
    let config = match &initial_config {
        Some(cfg) => cfg.as_ref(),
        None => {
            warn!("InitialConfig not found, using defaults");
            &InitialConfig::default()
        }
    };

    fixed_time.set_timestep_seconds(1.0 / config.tick_rate);

    sim_config.tick_rate = config.tick_rate;
    sim_config.screen = Size2::new(
        FixedNumU::from_num(config.screen_width),
        FixedNumU::from_num(config.screen_height),
    );
    sim_config.body_size = FixedNumU::from_num(config.body_size);
    sim_config.friction = FixedNum::from_num(config.friction);
    sim_config.restitution = FixedNum::from_num(config.restitution);
    sim_config.restitution_threshold = FixedNum::from_num(config.restitution_threshold);
    sim_config.input_force = FixedNum::from_num(config.input_force);
    sim_config.spawn_speed = FixedNum::from_num(config.spawn_speed);
    sim_config.shake_speed = FixedNum::from_num(config.shake_speed);
    sim_config.pixel_scale = config.pixel_scale;

    gravity.force = FixedVec2::new(
        FixedNum::from_num(config.gravity_x),
        FixedNum::from_num(config.gravity_y),
    );

    info!(
        "SimConfig initialized: {}x{} screen at {} Hz, friction {}, restitution {}",
        sim_config.screen.width,
        sim_config.screen.height,
        sim_config.tick_rate,
        sim_config.friction,
        sim_config.restitution
    );
}

/// Handle hot-reloadable runtime configuration (key bindings).
pub fn update_sim_from_runtime_config(
    config_handle: Res<GameConfigHandle>,
    game_configs: Res<Assets<GameConfig>>,
    mut events: MessageReader<AssetEvent<GameConfig>>,
) {
    for event in events.read() {
        if event.is_modified(config_handle.0.id()) || event.is_loaded_with_dependencies(config_handle.0.id()) {
            if let Some(_config) = game_configs.get(&config_handle.0) {
                info!("Runtime config loaded/updated (key bindings)");
            }
        }
    }
}
