//! Headless end-to-end tests: the full plugin stack driven one fixed tick
//! at a time, with key presses injected straight into the input resource.

use bevy::prelude::*;

use tumbler::game::body::{Bodies, BodyPlugin, BODY_COUNT, PLAYER_INDEX};
use tumbler::game::config::{GameConfig, GameConfigHandle, GameConfigPlugin};
use tumbler::game::control::ControlPlugin;
use tumbler::game::geometry::{Rect, Size2};
use tumbler::game::math::{FixedNum, FixedPoint2, FixedVec2};
use tumbler::game::simulation::{Gravity, SimConfig, SimTick, SimulationPlugin};

fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::asset::AssetPlugin::default());
    app.init_resource::<ButtonInput<KeyCode>>();
    app.add_plugins(bevy::gizmos::GizmoPlugin);
    app.add_plugins(GameConfigPlugin);
    app.add_plugins(SimulationPlugin);
    app.add_plugins(ControlPlugin);
    app.add_plugins(BodyPlugin);

    // Freeze virtual time so the fixed schedule only runs when the tests
    // drive it by hand.
    app.world_mut().resource_mut::<Time<Virtual>>().pause();

    // Run startup (config load, body scatter).
    app.update();

    // Swap in key bindings synchronously instead of waiting on the async
    // asset load.
    let handle = app
        .world_mut()
        .resource_mut::<Assets<GameConfig>>()
        .add(GameConfig::default());
    app.world_mut().insert_resource(GameConfigHandle(handle));
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
}

fn release_all(app: &mut App) {
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release_all();
    keys.clear();
}

/// Clear edge state while keeping held keys held.
fn settle_edges(app: &mut App) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
}

#[test]
fn population_spawns_inside_the_playfield() {
    let app = build_app();
    let config = app.world().resource::<SimConfig>();
    let field = config.playfield();
    let screen = Rect::new(FixedPoint2::ORIGIN, config.screen);
    let bodies = app.world().resource::<Bodies>();
    assert_eq!(bodies.0.len(), BODY_COUNT);
    for body in &bodies.0 {
        assert!(field.intersects(body.position), "{:?}", body.position);
        // The whole 8x8 footprint fits on screen, not just the anchor.
        let footprint = body.footprint(Size2::splat(config.body_size));
        assert!(screen.intersects_rect(&footprint));
        assert!(footprint.right() <= screen.right());
        assert!(footprint.bottom() <= screen.bottom());
    }
}

#[test]
fn ticks_advance_the_counter_and_hold_the_clamp_invariant() {
    let mut app = build_app();
    let (field, start_tick) = {
        let world = app.world();
        (world.resource::<SimConfig>().playfield(), world.resource::<SimTick>().0)
    };

    for _ in 0..200 {
        tick(&mut app);
        for body in &app.world().resource::<Bodies>().0 {
            let pre = body.position - body.velocity;
            assert!(pre.x >= field.left() && pre.x <= field.right());
            assert!(pre.y >= field.top() && pre.y <= field.bottom());
        }
    }
    assert_eq!(app.world().resource::<SimTick>().0, start_tick + 200);
}

#[test]
fn modifier_up_toggles_gravity_once_per_press() {
    let mut app = build_app();
    assert!(!app.world().resource::<Gravity>().is_enabled());

    press(&mut app, KeyCode::KeyX);
    press(&mut app, KeyCode::ArrowUp);
    tick(&mut app);
    assert!(app.world().resource::<Gravity>().is_enabled());

    // Holding the key is not a new edge.
    settle_edges(&mut app);
    tick(&mut app);
    assert!(app.world().resource::<Gravity>().is_enabled());

    // A second press toggles back.
    release_all(&mut app);
    press(&mut app, KeyCode::KeyX);
    press(&mut app, KeyCode::ArrowUp);
    tick(&mut app);
    assert!(!app.world().resource::<Gravity>().is_enabled());
}

#[test]
fn double_inversion_restores_the_exact_gravity_vector() {
    let mut app = build_app();
    let before = app.world().resource::<Gravity>().force;

    for _ in 0..2 {
        press(&mut app, KeyCode::KeyX);
        press(&mut app, KeyCode::ArrowDown);
        tick(&mut app);
        release_all(&mut app);
        tick(&mut app);
    }
    assert_eq!(app.world().resource::<Gravity>().force, before);
}

#[test]
fn held_direction_keys_push_the_player() {
    let mut app = build_app();
    let input_force = app.world().resource::<SimConfig>().input_force;
    let before = app.world().resource::<Bodies>().player().velocity;

    press(&mut app, KeyCode::ArrowRight);
    tick(&mut app);
    let after = app.world().resource::<Bodies>().player().velocity;
    // The impulse lands before the step damps and integrates, so compare
    // against the damped sum.
    let expected = (before.x + input_force).wrapping_mul(
        app.world().resource::<SimConfig>().friction,
    );
    assert_eq!(after.x, expected);
}

#[test]
fn opposing_direction_keys_cancel() {
    let mut app = build_app();
    let before = app.world().resource::<Bodies>().player().velocity.x;
    press(&mut app, KeyCode::ArrowLeft);
    press(&mut app, KeyCode::ArrowRight);
    tick(&mut app);
    let after = app.world().resource::<Bodies>().player().velocity.x;
    assert_eq!(after, before.wrapping_mul(app.world().resource::<SimConfig>().friction));
}

#[test]
fn action_edge_is_an_emergency_stop() {
    let mut app = build_app();
    app.world_mut()
        .resource_mut::<Bodies>()
        .player_mut()
        .velocity = FixedVec2::new(FixedNum::from_num(3), FixedNum::from_num(-2));

    press(&mut app, KeyCode::KeyZ);
    tick(&mut app);
    // Stopped before the step ran: nothing to damp or integrate, so the
    // player's velocity is exactly zero afterwards (gravity is off).
    assert_eq!(
        app.world().resource::<Bodies>().player().velocity,
        FixedVec2::ZERO
    );
}

#[test]
fn player_is_the_first_body_slot() {
    let mut app = build_app();
    let kick = FixedVec2::new(FixedNum::from_num(1), FixedNum::ZERO);
    app.world_mut().resource_mut::<Bodies>().0[PLAYER_INDEX].velocity = kick;
    assert_eq!(app.world().resource::<Bodies>().player().velocity, kick);

    // The controller's emergency stop writes through the same storage.
    press(&mut app, KeyCode::KeyZ);
    tick(&mut app);
    assert_eq!(
        app.world().resource::<Bodies>().0[PLAYER_INDEX].velocity,
        FixedVec2::ZERO
    );
}

#[test]
fn shake_scatters_back_onto_the_playfield() {
    let mut app = build_app();
    let field = app.world().resource::<SimConfig>().playfield();

    // Let the population drift for a while, then shake.
    for _ in 0..50 {
        tick(&mut app);
    }
    press(&mut app, KeyCode::KeyX);
    press(&mut app, KeyCode::KeyZ);
    tick(&mut app);

    // The step integrated once after the shake, so compare the
    // pre-integration positions against the field.
    for body in &app.world().resource::<Bodies>().0 {
        let pre = body.position - body.velocity;
        assert!(field.intersects(pre), "{:?}", body);
    }
}
