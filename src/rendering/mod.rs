use macroquad::prelude::*;

use crate::application::{Camera, GameState, LayerMode};
use crate::domain::Pattern;
use crate::ui::{panel_x, Button, ButtonAction, Dropdown, PANEL_WIDTH};

const ALIVE_COLOR: Color = Color::new(0.0, 1.0, 0.59, 1.0);
const FADED_COLOR: Color = Color::new(0.0, 1.0, 0.59, 0.15);
const BOX_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);
const LAYER_COLOR: Color = Color::new(0.25, 0.35, 0.6, 1.0);
const HIGHLIGHT_COLOR: Color = Color::new(1.0, 1.0, 0.0, 1.0);

/// Format large numbers with K/M/B suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw lattice bounds, the working layer, cell proxies and the highlight
pub fn draw_scene(state: &GameState, camera: &Camera, pattern: Option<&Pattern>) {
    set_camera(&camera.to_camera3d(screen_width() / screen_height()));

    let bound = state.bound();
    let picker = state.picker();
    let cell_size = picker.cell_size;
    let (min, max) = picker.bounds(bound);
    draw_cube_wires(Vec3::ZERO, max - min, BOX_COLOR);
    draw_layer_grid(state, min, max);

    let cube = Vec3::splat(cell_size * 0.9);
    for proxy in state.pool.active_proxies().filter(|proxy| proxy.visible) {
        let layer = picker.world_to_cell(proxy.position, bound).y;
        if state.layers.is_visible(layer) {
            draw_cube(proxy.position, cube, None, ALIVE_COLOR);
            draw_cube_wires(proxy.position, cube, DARKGREEN);
        } else {
            draw_cube(proxy.position, cube, None, FADED_COLOR);
        }
    }

    if let Some(highlight) = state.highlight {
        let center = picker.cell_center(highlight, bound);
        draw_cube_wires(center, Vec3::splat(cell_size), HIGHLIGHT_COLOR);

        if let Some(pattern) = pattern {
            for position in pattern.positions_around(highlight).filter(|p| p.within(bound)) {
                draw_cube(picker.cell_center(position, bound), cube, None, Color::new(0.0, 1.0, 0.59, 0.45));
            }
        }
    }

    set_default_camera();
}

/// Grid lines on the floor of the working layer
fn draw_layer_grid(state: &GameState, min: Vec3, max: Vec3) {
    let bound = state.bound();
    let cell_size = state.picker().cell_size;
    let y = min.y + state.layers.layer as f32 * cell_size;

    for i in 0..=bound {
        let offset = i as f32 * cell_size;
        draw_line_3d(vec3(min.x + offset, y, min.z), vec3(min.x + offset, y, max.z), LAYER_COLOR);
        draw_line_3d(vec3(min.x, y, min.z + offset), vec3(max.x, y, min.z + offset), LAYER_COLOR);
    }
}

/// Draw control panel background
fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 240),
    );
}

/// Helper to draw text labels
fn draw_text_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Green, yellow, orange or red depending on how long a step took
fn timing_color(ms: f32) -> Color {
    if ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if ms < 33.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else if ms < 100.0 {
        Color::from_rgba(255, 165, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    }
}

/// Draw the side panel with buttons, dropdowns, statistics and pool usage
pub fn draw_controls(
    state: &GameState,
    buttons: &[(ButtonAction, Button)],
    dropdowns: &[&Dropdown],
    mouse_pos: (f32, f32),
) {
    draw_panel_background();
    buttons.iter().for_each(|(_, button)| button.draw(mouse_pos));

    let px = panel_x() + 6.0;
    let stats = &state.stats;
    let info = Color::from_rgba(180, 180, 180, 255);
    let running = state.is_running();

    let mode = match state.layers.mode {
        LayerMode::Single => "single",
        LayerMode::Stacked => "stacked",
    };
    let min_fps = if stats.min_fps == f32::MAX { 0.0 } else { stats.min_fps };
    let step_ms = state.scheduler.last_step_ms();

    let labels: Vec<(String, f32, Color)> = vec![
        (format!("Lattice: {0}x{0}x{0}", state.bound()), 14.0, WHITE),
        (format!("Cells: {}", format_number(stats.total_cells)), 12.0, info),
        (format!("Rule: {}  {}", state.rule.name(), state.rule.description()), 12.0, info),
        (format!("Layer: {} ({})", state.layers.layer, mode), 12.0, info),
        (String::new(), 6.0, info),
        (format!("Generation: {}", stats.generation), 16.0, ALIVE_COLOR),
        (format!("Alive: {}  Dead: {}", format_number(stats.alive_cells), format_number(stats.dead_cells())), 12.0, info),
        (format!("Interval: {:.1}s", state.scheduler.interval()), 12.0, info),
        (format!("Sim time: {:.1}s", stats.simulation_time), 12.0, info),
        (format!("Step: {:.2}ms ({})", step_ms, state.scheduler.algorithm().name()), 12.0, timing_color(step_ms)),
        (format!("Render: {:.1}ms", state.last_render_time_ms), 12.0, timing_color(state.last_render_time_ms)),
        (format!("FPS: {:.0} (min {:.0}, max {:.0})", get_fps(), min_fps, stats.max_fps), 12.0, info),
        (format!("Drops < 60: {}", stats.drop_count), 12.0, info),
        (String::new(), 6.0, info),
        (
            format!(
                "Pool: {} active, {} idle",
                format_number(state.pool.active_count()),
                format_number(state.pool.inactive_count())
            ),
            12.0,
            info,
        ),
        (
            format!(
                "Usage: {:.0}%  Max: {}/{}",
                state.pool.usage_percent(),
                state.pool.soft_max(),
                state.pool.sizing().hard_max
            ),
            12.0,
            info,
        ),
        (format!("Exhausted: {}  Waiting: {}", state.pool.exhausted_count(), state.pending_count()), 12.0, info),
        (
            if running { "Running".to_owned() } else { "Paused".to_owned() },
            16.0,
            if running {
                Color::from_rgba(0, 255, 0, 255)
            } else {
                Color::from_rgba(255, 165, 0, 255)
            },
        ),
        (String::new(), 6.0, info),
        ("LMB place / RMB remove".to_owned(), 12.0, GRAY),
        ("Mid-drag orbit, wheel zoom".to_owned(), 12.0, GRAY),
        ("Q/E layer, Tab mode, N rule".to_owned(), 12.0, GRAY),
        ("S step, Up/Down speed, H home".to_owned(), 12.0, GRAY),
    ];

    let mut y = 430.0;
    for (text, size, color) in &labels {
        y += size + 3.0;
        if !text.is_empty() {
            draw_text_label(text, px, y, *size, *color);
        }
    }

    // Open dropdown last so its list covers everything else
    dropdowns
        .iter()
        .filter(|dropdown| !dropdown.is_open())
        .for_each(|dropdown| dropdown.draw(mouse_pos));
    if let Some(open) = dropdowns.iter().find(|dropdown| dropdown.is_open()) {
        open.draw(mouse_pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(125), "125");
        assert_eq!(format_number(125_000), "125.0K");
        assert_eq!(format_number(2_500_000), "2.5M");
    }
}
