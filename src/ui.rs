/*
 * UI Module
 *
 * This module builds the egui control panel. Engine parameters are edited
 * in place; anything that touches the flock itself (population, radii) is
 * returned as commands so the store's own rules still apply.
 */

use nannou_egui::{egui, Egui};

use crate::command::Command;
use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::params::SimulationParams;

#[derive(Debug, Default)]
pub struct UiResponse {
    pub commands: Vec<Command>,
    pub params_changed: bool,
}

// Update the UI and collect what the user asked for this frame
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    flock: &Flock,
    debug_info: &DebugInfo,
    visible: bool,
) -> UiResponse {
    let mut response = UiResponse::default();
    let before = params.clone();

    let ctx = egui.begin_frame();
    if !visible {
        return response;
    }

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 340.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                ui.label(format!("Entities: {} / {}", flock.len(), flock.capacity()));
                ui.horizontal(|ui| {
                    if ui.button("Spawn").clicked() {
                        response.commands.push(Command::Spawn);
                    }
                    if ui.button("Remove last").clicked() {
                        response.commands.push(Command::DespawnLast);
                    }
                });
            });

            ui.collapsing("Radii", |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("Repulsion: {:.0}", flock.repulsion_radius()));
                    if ui.button("-").clicked() {
                        response.commands.push(Command::shrink_repulsion());
                    }
                    if ui.button("+").clicked() {
                        response.commands.push(Command::grow_repulsion());
                    }
                });
                ui.horizontal(|ui| {
                    ui.label(format!("Group: {:.0}", flock.group_radius()));
                    if ui.button("-").clicked() {
                        response.commands.push(Command::shrink_group());
                    }
                    if ui.button("+").clicked() {
                        response.commands.push(Command::grow_group());
                    }
                });
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut params.cohesion_weight, SimulationParams::weight_range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut params.alignment_weight, SimulationParams::weight_range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut params.repulsion_smoothing, SimulationParams::smoothing_range()).text("Repulsion Smoothing"));
                ui.add(egui::Slider::new(&mut params.group_smoothing, SimulationParams::smoothing_range()).text("Group Smoothing"));
                ui.add(egui::Slider::new(&mut params.steer_strength, SimulationParams::steer_strength_range()).text("Edge Steering"));
                ui.add(egui::Slider::new(&mut params.drag, SimulationParams::drag_range()).text("Drag"));
                ui.checkbox(&mut params.fov_enabled, "Field of View Gate");
                ui.add(egui::Slider::new(&mut params.fov_angle, SimulationParams::fov_angle_range()).text("FOV Angle (rad)"));

                if ui.button("Reset Defaults").clicked() {
                    *params = SimulationParams::default();
                }
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Mean speed: {:.2}", debug_info.stats.mean_speed));
        });

    response.params_changed = *params != before;
    response
}
