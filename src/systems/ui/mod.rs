use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::systems::terrain::mesh::terrain::MAX_DEPTH;
use crate::systems::terrain::{Params, RegenerateEvent, Seed, TerrainMesh};

#[derive(Resource)]
pub struct PanelVisible(pub bool);

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app
            .insert_resource(PanelVisible(false))
            .add_systems(Update, key_input)
            .add_systems(EguiPrimaryContextPass, (ui_main, fps)); // UI rendering here
    }
}

fn key_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut panel_visible: ResMut<PanelVisible>,
    mut regen_events: EventWriter<RegenerateEvent>,
) {
    if keyboard_input.just_pressed(KeyCode::Tab) {
        panel_visible.0 = !panel_visible.0;
    }

    // R rolls a new seed with the current parameters
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        regen_events.write(RegenerateEvent { seed: rand::random() });
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    current_seed: Res<Seed>,
    mut params: ResMut<Params>,
    mut regen_events: EventWriter<RegenerateEvent>,
    panel_visible: Res<PanelVisible>,
    mesh: Option<Res<TerrainMesh>>,
) {
    if !panel_visible.0 {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("config_panel")
            .default_width(200.0)
            .min_width(220.0)
            .max_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                let mut regenerate = false;

                // seed
                egui::CollapsingHeader::new("Seed")
                    .default_open(true)
                    .show(ui, |ui| {
                    ui.label(format!("Current: {}", current_seed.0));
                    if ui.button("Regenerate")
                        .on_hover_text("New random seed, same parameters (R)")
                        .clicked() {
                        regen_events.write(RegenerateEvent { seed: rand::random() });
                    }
                });

                egui::CollapsingHeader::new("Subdivision")
                    .default_open(true)
                    .show(ui, |ui| {
                    regenerate |= ui.add(egui::Slider::new(&mut params.depth, 0..=MAX_DEPTH)
                        .text("Depth"))
                        .on_hover_text("Each level splits every triangle into four.")
                        .changed();
                    regenerate |= ui.add(egui::Slider::new(&mut params.roughness, 0.0..=1.0)
                        .text("Roughness"))
                        .on_hover_text("How far new midpoints may stray from their edge.")
                        .changed();
                });

                ui.separator();

                // mesh statistics
                if let Some(mesh) = mesh.as_ref() {
                    let stats = mesh.0.stats();
                    egui::Grid::new("mesh_stats").show(ui, |ui| {
                        ui.label("Triangles:");
                        ui.label(stats.triangles.to_string());
                        ui.end_row();
                        ui.label("Points:");
                        ui.label(stats.points.to_string());
                        ui.end_row();
                        ui.label("Edges:");
                        ui.label(stats.edges.to_string());
                        ui.end_row();
                        ui.label("Midpoints:");
                        ui.label(format!("{} ({} shared)", stats.cached_midpoints, stats.shared_midpoints));
                        ui.end_row();
                    });
                } else {
                    ui.label(egui::RichText::new("No mesh").color(egui::Color32::from_rgb(178, 34, 34)));
                }

                ui.separator();
                ui.label("TAB - Toggle panel");
                ui.label("ESC - Exit");

                // rebuild with the same seed on any parameter change
                if regenerate {
                    regen_events.write(RegenerateEvent { seed: current_seed.0 });
                }
            });
    }
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(egui::RichText::new(format!("{:.0}", fps))
                                .size(18.0)
                                .color(egui::Color32::BLACK));
                        }
                    }
                });
            });
    }
}
