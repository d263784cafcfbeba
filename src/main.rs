use log::info;
use macroquad::prelude::*;

use life3d::{
    Algorithm, Camera, GameState, RulePreset, SimulationConfig,
    application::LATTICE_SIZES,
    input::{self, InputState},
    presets, rendering,
    ui::{self, Dropdown},
};

fn window_conf() -> Conf {
    Conf {
        window_title: "3D Game of Life".to_owned(),
        window_width: 1100,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

const DROPDOWN_TOP: f32 = 30.0;
const DROPDOWN_SPACING: f32 = 50.0;

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimulationConfig::default();
    let mut state = GameState::new(config);
    let mut camera = Camera::new();
    camera.frame_lattice(state.bound(), state.config.lattice.cell_size);
    let mut input_state = InputState::new();
    info!("Starting with a {0}x{0}x{0} lattice", state.bound());

    let px = ui::panel_x();
    let mut size_dropdown = Dropdown::new(px, 0.0, ui::PANEL_WIDTH, "Lattice Size", ui::lattice_size_labels());
    if let Some(index) = LATTICE_SIZES.iter().position(|&n| n == state.bound()) {
        size_dropdown.set_selected(index);
    }

    let rules = RulePreset::all();
    let mut rule_dropdown = Dropdown::new(
        px,
        0.0,
        ui::PANEL_WIDTH,
        "Rule",
        rules.iter().map(|rule| rule.name().to_owned()).collect(),
    );
    if let Some(index) = rules.iter().position(|&rule| rule == state.rule) {
        rule_dropdown.set_selected(index);
    }

    let algorithms = Algorithm::all();
    let mut algorithm_dropdown = Dropdown::new(
        px,
        0.0,
        ui::PANEL_WIDTH,
        "Algorithm",
        algorithms.iter().map(|algorithm| algorithm.name().to_owned()).collect(),
    );
    if let Some(index) = algorithms.iter().position(|&a| a == state.scheduler.algorithm()) {
        algorithm_dropdown.set_selected(index);
    }

    let patterns = presets::all_patterns();
    let mut pattern_dropdown = Dropdown::new(
        px,
        0.0,
        ui::PANEL_WIDTH,
        "Pattern",
        patterns.iter().map(|pattern| pattern.name.to_owned()).collect(),
    );

    loop {
        let mouse_pos = mouse_position();

        let px = ui::panel_x();
        for (i, dropdown) in [
            &mut size_dropdown,
            &mut rule_dropdown,
            &mut algorithm_dropdown,
            &mut pattern_dropdown,
        ]
        .into_iter()
        .enumerate()
        {
            dropdown.set_position(px, DROPDOWN_TOP + i as f32 * DROPDOWN_SPACING);
        }

        let mut buttons = ui::create_buttons();
        for (action, button) in buttons.iter_mut() {
            if *action == ui::ButtonAction::PlayPause {
                button.set_active(state.is_running());
            }
        }

        // A click on an open list must not fall through to the widgets below
        let panel_click_taken = [&size_dropdown, &rule_dropdown, &algorithm_dropdown, &pattern_dropdown]
            .iter()
            .any(|dropdown| dropdown.is_open() && dropdown.captures(mouse_pos));

        if let Some(index) = size_dropdown.update(mouse_pos) {
            state.resize_lattice(LATTICE_SIZES[index]);
            camera.frame_lattice(state.bound(), state.config.lattice.cell_size);
        }
        if let Some(index) = rule_dropdown.update(mouse_pos) {
            state.select_rule(rules[index]);
        }
        if let Some(index) = algorithm_dropdown.update(mouse_pos) {
            state.scheduler.set_algorithm(algorithms[index]);
        }
        if let Some(index) = pattern_dropdown.update(mouse_pos) {
            state.pending_pattern_index = Some(index);
        }
        // Keep the rule selector in step with the N shortcut
        if let Some(index) = rules.iter().position(|&rule| rule == state.rule) {
            rule_dropdown.set_selected(index);
        }

        if !panel_click_taken {
            input::process_button_clicks(&mut state, &buttons, mouse_pos);
        }
        input::handle_zoom(&mut camera);
        input_state.handle_orbit(&mut camera, mouse_pos);

        match state.pending_pattern_index {
            Some(index) => {
                if is_mouse_button_pressed(MouseButton::Right) || is_key_pressed(KeyCode::Escape) {
                    state.pending_pattern_index = None;
                } else if ui::in_viewport(mouse_pos) {
                    let ray = camera.screen_ray(mouse_pos.0, mouse_pos.1, screen_width(), screen_height());
                    state.update_highlight(&ray, get_time());
                    if is_mouse_button_pressed(MouseButton::Left) {
                        if let Some(center) = state.highlight {
                            state.place_pattern(&patterns[index], center);
                            state.pending_pattern_index = None;
                        }
                    }
                }
            }
            None => input::handle_cell_editing(&mut state, &camera, mouse_pos),
        }
        input::process_keyboard_input(&mut state, &mut camera);

        state.tick(get_frame_time());

        let render_start = std::time::Instant::now();
        clear_background(Color::from_rgba(12, 12, 16, 255));
        let preview = state.pending_pattern_index.map(|index| &patterns[index]);
        rendering::draw_scene(&state, &camera, preview);
        rendering::draw_controls(
            &state,
            &buttons,
            &[&size_dropdown, &rule_dropdown, &algorithm_dropdown, &pattern_dropdown],
            mouse_pos,
        );
        state.last_render_time_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }
}
