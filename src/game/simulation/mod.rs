/// Simulation layer - deterministic sandbox logic.
///
/// This module is organized into:
/// - **resources**: fixed-point tuning config, gravity state, tick counter
/// - **physics**: the per-tick integration and collision-response step
/// - **systems_config**: float config to fixed-point conversion at startup
///
/// Everything here runs on FixedUpdate in two chained sets: input is folded
/// into the player body first, then every body is stepped. One tick either
/// completes in full or has not happened yet; nothing outside these systems
/// writes to the body array.

use bevy::prelude::*;

pub mod physics;
pub mod resources;
pub mod systems_config;

pub use resources::*;
pub use systems_config::{init_sim_config_from_initial, update_sim_from_runtime_config};

// System sets for organizing execution order
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SimSet {
    /// Processing inputs into parameter and player-velocity changes
    Input,
    /// Advancing every body by one tick
    Step,
}

/// Main simulation plugin
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Default timestep; overridden from InitialConfig at startup.
        app.insert_resource(Time::<Fixed>::from_hz(60.0));

        app.init_resource::<SimConfig>();
        app.init_resource::<Gravity>();
        app.init_resource::<DebugConfig>();
        app.init_resource::<SimTick>();

        app.configure_sets(FixedUpdate, (SimSet::Input, SimSet::Step).chain());

        app.add_systems(
            Startup,
            init_sim_config_from_initial.after(crate::game::config::load_initial_config),
        );
        app.add_systems(Update, update_sim_from_runtime_config);
        app.add_systems(FixedUpdate, physics::step_bodies.in_set(SimSet::Step));
    }
}
