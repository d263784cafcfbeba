use macroquad::prelude::*;

use crate::application::{Camera, GameState};
use crate::ui::{self, Button, ButtonAction};

/// Mouse state carried between frames
#[derive(Default)]
pub struct InputState {
    last_drag: Option<(f32, f32)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orbit the camera with middle mouse button drag
    pub fn handle_orbit(&mut self, camera: &mut Camera, mouse_pos: (f32, f32)) {
        if !is_mouse_button_down(MouseButton::Middle) {
            self.last_drag = None;
            return;
        }
        if let Some(last) = self.last_drag {
            camera.orbit(mouse_pos.0 - last.0, mouse_pos.1 - last.1);
        }
        self.last_drag = Some(mouse_pos);
    }
}

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Track the cell under the cursor and edit it with the mouse buttons.
/// LMB places a cell, RMB removes one.
pub fn handle_cell_editing(state: &mut GameState, camera: &Camera, mouse_pos: (f32, f32)) {
    if !ui::in_viewport(mouse_pos) {
        state.clear_highlight();
        return;
    }

    let ray = camera.screen_ray(mouse_pos.0, mouse_pos.1, screen_width(), screen_height());
    state.update_highlight(&ray, get_time());

    if is_mouse_button_pressed(MouseButton::Left) {
        state.place_at_highlight();
    } else if is_mouse_button_pressed(MouseButton::Right) {
        state.remove_at_highlight();
    }
}

/// Process keyboard shortcuts
pub fn process_keyboard_input(state: &mut GameState, camera: &mut Camera) {
    type KeyAction = (KeyCode, fn(&mut GameState));

    let actions: [KeyAction; 10] = [
        (KeyCode::Space, GameState::toggle_running),
        (KeyCode::C, GameState::reset),
        (KeyCode::R, GameState::randomize),
        (KeyCode::S, GameState::step_once),
        (KeyCode::Up, GameState::speed_up),
        (KeyCode::Down, GameState::slow_down),
        (KeyCode::E, GameState::show_layer),
        (KeyCode::Q, GameState::hide_layer),
        (KeyCode::Tab, GameState::toggle_layer_mode),
        (KeyCode::N, GameState::cycle_rule),
    ];

    for (key, action) in actions {
        if is_key_pressed(key) {
            action(state);
        }
    }

    // Reset camera with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.reset();
        camera.frame_lattice(state.bound(), state.config.lattice.cell_size);
    }
}

/// Run the action of whichever panel button was clicked
pub fn process_button_clicks(
    state: &mut GameState,
    buttons: &[(ButtonAction, Button)],
    mouse_pos: (f32, f32),
) {
    let Some((action, _)) = buttons.iter().find(|(_, button)| button.is_clicked(mouse_pos)) else {
        return;
    };
    match action {
        ButtonAction::PlayPause => state.toggle_running(),
        ButtonAction::Step => state.step_once(),
        ButtonAction::Clear => state.reset(),
        ButtonAction::Randomize => state.randomize(),
    }
}
