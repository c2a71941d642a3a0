//! Diagnostic stats overlay.
//!
//! A single text block in the top-left corner showing the tick counter, the
//! gravity regime and the tuning coefficients, plus the player's kinematic
//! state. Hidden by default; the controller toggles it. All fixed-point
//! values cross to floating point here, at the display boundary, and
//! nowhere else.

use bevy::prelude::*;

use crate::game::body::Bodies;
use crate::game::simulation::{DebugConfig, Gravity, SimConfig, SimTick};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, update_stats_text);
    }
}

#[derive(Component)]
struct StatsText;

fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(8.0),
            top: Val::Px(8.0),
            ..default()
        },
        Visibility::Hidden,
        StatsText,
    ));
}

fn update_stats_text(
    debug_config: Res<DebugConfig>,
    tick: Res<SimTick>,
    gravity: Res<Gravity>,
    sim_config: Res<SimConfig>,
    bodies: Option<Res<Bodies>>,
    mut query: Query<(&mut Text, &mut Visibility), With<StatsText>>,
) {
    let Ok((mut text, mut visibility)) = query.single_mut() else { return };

    if !debug_config.show_stats {
        *visibility = Visibility::Hidden;
        return;
    }
    *visibility = Visibility::Visible;

    let Some(bodies) = bodies else { return };
    let player = bodies.player();
    text.0 = format!(
        "tick {}\ngravity {:?} ({:.3}, {:.3})\nfriction {:.3}  restitution {:.3}\nplayer pos ({:.3}, {:.3}) vel ({:.3}, {:.3})",
        tick.0,
        gravity.mode,
        gravity.force.x.to_num::<f32>(),
        gravity.force.y.to_num::<f32>(),
        sim_config.friction.to_num::<f32>(),
        sim_config.restitution.to_num::<f32>(),
        player.position.x.to_num::<f32>(),
        player.position.y.to_num::<f32>(),
        player.velocity.x.to_num::<f32>(),
        player.velocity.y.to_num::<f32>(),
    );
}
