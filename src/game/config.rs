use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use serde::{Deserialize, Serialize};

/// Static configuration loaded once at startup. These values define the
/// simulation's tuning constants and are converted to fixed point exactly
/// once; changing them mid-run would change the physics under every body,
/// so there is deliberately no hot-reload path for them.
///
/// The physics coefficients must be representable on the 3-fractional-bit
/// grid (multiples of 0.125): the conversion rounds to nearest, so an
/// off-grid value quietly becomes a neighbouring one.
#[derive(Resource, Deserialize, Serialize, Clone, Debug)]
pub struct InitialConfig {
    pub tick_rate: f64,
    pub screen_width: f32,
    pub screen_height: f32,
    pub body_size: f32,
    pub pixel_scale: f32,
    pub friction: f32,
    pub restitution: f32,
    pub restitution_threshold: f32,
    pub gravity_x: f32,
    pub gravity_y: f32,
    pub input_force: f32,
    pub spawn_speed: f32,
    pub shake_speed: f32,
}

/// Runtime configuration that can be hot-reloaded during a session: the key
/// bindings for the six controls. Rebinding keys does not affect the
/// simulation state, so reloads are always safe.
#[derive(Deserialize, Serialize, Asset, TypePath, Clone, Debug)]
pub struct GameConfig {
    pub key_left: KeyCode,
    pub key_right: KeyCode,
    pub key_up: KeyCode,
    pub key_down: KeyCode,
    pub key_action: KeyCode,
    pub key_modifier: KeyCode,
}

#[derive(Resource)]
pub struct GameConfigHandle(pub Handle<GameConfig>);

pub struct GameConfigPlugin;

impl Plugin for GameConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<GameConfig>::new(&["sandbox_config.ron"]))
            .add_systems(Startup, (load_initial_config, setup_runtime_config).chain());
    }
}

/// Load static initial configuration synchronously at startup.
/// This must complete before any state that depends on these values.
pub fn load_initial_config(mut commands: Commands) {
    let initial_config_path = "assets/initial_config.ron";

    match std::fs::read_to_string(initial_config_path) {
        Ok(contents) => match ron::from_str::<InitialConfig>(&contents) {
            Ok(config) => {
                info!("Loaded initial config from {}", initial_config_path);
                commands.insert_resource(config);
            }
            Err(e) => {
                error!("Failed to parse initial config: {}", e);
                error!("Using default InitialConfig");
                commands.insert_resource(InitialConfig::default());
            }
        },
        Err(e) => {
            error!("Failed to read {}: {}", initial_config_path, e);
            error!("Using default InitialConfig");
            commands.insert_resource(InitialConfig::default());
        }
    }
}

/// Load runtime configuration asynchronously (can be hot-reloaded).
fn setup_runtime_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load("sandbox_config.ron");
    commands.insert_resource(GameConfigHandle(handle));
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            screen_width: 128.0,
            screen_height: 64.0,
            body_size: 8.0,
            pixel_scale: 6.0,
            friction: 0.875,
            restitution: 0.25,
            restitution_threshold: 2.0,
            gravity_x: 0.0,
            gravity_y: 0.5,
            input_force: 0.5,
            spawn_speed: 3.0,
            shake_speed: 8.0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            key_left: KeyCode::ArrowLeft,
            key_right: KeyCode::ArrowRight,
            key_up: KeyCode::ArrowUp,
            key_down: KeyCode::ArrowDown,
            key_action: KeyCode::KeyZ,
            key_modifier: KeyCode::KeyX,
        }
    }
}
