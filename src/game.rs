use bevy::prelude::*;

pub mod body;
pub mod config;
pub mod control;
pub mod geometry;
pub mod hud;
pub mod math;
pub mod simulation;

use body::BodyPlugin;
use config::GameConfigPlugin;
use control::ControlPlugin;
use hud::HudPlugin;
use simulation::SimulationPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            GameConfigPlugin,
            SimulationPlugin,
            ControlPlugin,
            BodyPlugin,
            HudPlugin,
        ))
        // Monochrome presentation: white bodies on a black field.
        .insert_resource(ClearColor(Color::BLACK))
        .add_systems(Startup, setup_game);
    }
}

fn setup_game(mut commands: Commands) {
    info!("Sandbox setup started");
    commands.spawn(Camera2d::default());
}
