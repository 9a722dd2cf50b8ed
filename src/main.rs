use std::time::Duration;

use bevy::prelude::*;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::window::{WindowPlugin, WindowResolution};
use bevy::winit::{UpdateMode, WinitSettings};
use bevy_egui::EguiPlugin;

pub mod config;
pub mod systems;


// import modules here
use systems::terrain::TerrainPlugin;
use systems::ui::UIPlugin;

use crate::config::*;

fn main() -> bevy::app::AppExit {
    // fixed-rate redraw; the loop also wakes on input so ESC/close stay responsive
    let frame_tick = UpdateMode::reactive(Duration::from_secs_f64(1.0 / FRAME_RATE));

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.to_string(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())

        // my custom plugins
        .add_plugins(TerrainPlugin)
        .add_plugins(UIPlugin)

        .insert_resource(WinitSettings {
            focused_mode: frame_tick,
            unfocused_mode: frame_tick,
        })
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .add_systems(Startup, start)
        .add_systems(Update, handle_exit)
        .run()
}

// application entry point here
fn start(
    mut commands: Commands
) {
    commands.spawn(Camera2d);
}

// application exit
fn handle_exit(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
