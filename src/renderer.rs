/*
 * Renderer Module
 *
 * This module draws the flock and the overlay. Simulation space has its
 * origin in the top-left corner with y pointing down; nannou's has it in
 * the centre with y pointing up, so every point goes through `to_screen`.
 *
 * Entities are triangles pointing along their velocity, coloured by speed
 * (blue at rest through to red at the speed limit).
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::entity::Entity;
use crate::flock::EntityId;
use crate::MAX_ENTITIES;

const LINE_HEIGHT: f32 = 30.0;
const LABEL_WIDTH: f32 = 420.0;
const PROBE_SCALE: f32 = 100.0;

const HELP_LINES: [&str; 10] = [
    "F - Toggle FPS display",
    "E - Toggle Energy display",
    "N - Toggle Count display",
    "M / ; - Remove last entity",
    "I - Show radii info",
    "L/R arrows - Change group radius",
    "U/D arrows - Change repulsion radius",
    "Tab - Parameter panel",
    "Space - Pause",
    "ESC - Quit",
];

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(WHITESMOKE);

    let max_speed = model.params.max_speed;
    for entity in model.flock.entities() {
        draw_entity(&draw, entity, max_speed, window_rect);
    }

    if model.overlay.show_radii {
        draw_radii(&draw, model, window_rect);
    }
    draw_overlay_text(&draw, model, window_rect);

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(error = ?err, "failed to draw the flock");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(error = ?err, "failed to draw the control panel");
    }
}

// Convert a simulation-space point to nannou's window coordinates
fn to_screen(point: glam::Vec2, window_rect: Rect) -> Point2 {
    pt2(window_rect.left() + point.x, window_rect.top() - point.y)
}

fn draw_entity(draw: &Draw, entity: &Entity, max_speed: f32, window_rect: Rect) {
    let [tip, left, right] = entity.outline();
    let color = hsv(entity.hue(max_speed) / 360.0, 1.0, 0.8);

    draw.tri()
        .points(
            to_screen(tip, window_rect),
            to_screen(right, window_rect),
            to_screen(left, window_rect),
        )
        .color(color);
}

// Interaction radii and grouping vectors of the first entity
fn draw_radii(draw: &Draw, model: &Model, window_rect: Rect) {
    let Some(first) = model.flock.get(EntityId(0)) else {
        return;
    };
    let center = to_screen(first.position, window_rect);

    draw.ellipse()
        .xy(center)
        .radius(model.flock.repulsion_radius())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(RED);
    draw.ellipse()
        .xy(center)
        .radius(model.flock.group_radius())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(BLUE);

    if let Some(probe) = model.debug_info.probe {
        let vectors = [
            (probe.group_vector, MAGENTA),
            (probe.to_centroid, LIME),
            (probe.mean_direction, MAROON),
        ];
        for (vector, color) in vectors {
            let end = to_screen(first.position + vector * PROBE_SCALE, window_rect);
            draw.line().start(center).end(end).weight(2.0).color(color);
        }
    }
}

fn draw_overlay_text(draw: &Draw, model: &Model, window_rect: Rect) {
    let overlay = model.overlay;
    let info = &model.debug_info;
    let right_column = window_rect.right() - 220.0;

    if overlay.show_fps {
        draw_label(draw, &format!("FPS : {:.0}", info.fps), right_column, window_rect.top() - 20.0, GREEN);
    }
    if overlay.show_energy {
        draw_label(draw, &format!("Sim energy : {:.0}", info.stats.energy), right_column, window_rect.top() - 50.0, RED);
    }
    if overlay.show_count {
        let text = format!("Entity count : {}", model.flock.len());
        draw_label(draw, &text, right_column, window_rect.bottom() + 30.0, BLUE);
    }
    if model.paused {
        draw_label(draw, "PAUSED", right_column, window_rect.top() - 80.0, DARKORANGE);
    }

    if overlay.show_radii {
        let left = window_rect.left() + 10.0;
        let bottom = window_rect.bottom();
        draw_label(draw, &format!("Group radius : {:.0}", model.flock.group_radius()), left, bottom + 30.0, BLUE);
        draw_label(draw, &format!("Repulsion radius : {:.0}", model.flock.repulsion_radius()), left, bottom + 60.0, BLUE);
        draw_label(draw, "Maroon : mean direction", left, bottom + 90.0, BLUE);
        draw_label(draw, "Green : to centroid", left, bottom + 120.0, BLUE);
        draw_label(draw, "Magenta : scaled sum", left, bottom + 150.0, BLUE);
    }

    if overlay.show_help {
        let left = window_rect.left() + 10.0;
        let spawn_line = format!("P - Add entity (max {})", MAX_ENTITIES);
        let lines = std::iter::once(spawn_line.as_str()).chain(HELP_LINES);
        for (i, line) in lines.enumerate() {
            let y = window_rect.top() - 20.0 - i as f32 * LINE_HEIGHT;
            draw_label(draw, line, left, y, BLUE);
        }
    }
}

// Left-aligned label whose left edge sits at `left`, vertically centred on `y`
fn draw_label<C>(draw: &Draw, text: &str, left: f32, y: f32, color: C)
where
    C: nannou::color::IntoLinSrgba<f32>,
{
    draw.text(text)
        .x_y(left + LABEL_WIDTH / 2.0, y)
        .w_h(LABEL_WIDTH, LINE_HEIGHT)
        .left_justify()
        .color(color)
        .font_size(18);
}
