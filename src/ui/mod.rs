mod button;
mod dropdown;

pub use button::Button;
pub use dropdown::Dropdown;

use macroquad::prelude::screen_width;

use crate::application::LATTICE_SIZES;

pub const PANEL_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 34.0;
const BUTTON_GAP: f32 = 8.0;
const BUTTONS_TOP: f32 = 250.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Width of the 3D viewport left of the panel
pub fn viewport_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// True when the cursor is over the 3D view rather than the panel
pub fn in_viewport(mouse_pos: (f32, f32)) -> bool {
    mouse_pos.0 < viewport_width()
}

/// Labels for the lattice size selector, same order as `LATTICE_SIZES`
pub fn lattice_size_labels() -> Vec<String> {
    LATTICE_SIZES.iter().map(|n| format!("{n}x{n}x{n}")).collect()
}

/// What a panel button does when clicked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    PlayPause,
    Step,
    Clear,
    Randomize,
}

impl ButtonAction {
    pub const ALL: [ButtonAction; 4] = [
        ButtonAction::PlayPause,
        ButtonAction::Step,
        ButtonAction::Clear,
        ButtonAction::Randomize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ButtonAction::PlayPause => "Play/Pause",
            ButtonAction::Step => "Step",
            ButtonAction::Clear => "Clear",
            ButtonAction::Randomize => "Random",
        }
    }
}

/// Create panel buttons stacked under the dropdowns
pub fn create_buttons() -> Vec<(ButtonAction, Button)> {
    let px = panel_x();
    ButtonAction::ALL
        .iter()
        .enumerate()
        .map(|(i, &action)| {
            let y = BUTTONS_TOP + i as f32 * (BUTTON_HEIGHT + BUTTON_GAP);
            (action, Button::new(px, y, PANEL_WIDTH, BUTTON_HEIGHT, action.label()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_labels_match_sizes() {
        let labels = lattice_size_labels();
        assert_eq!(labels.len(), LATTICE_SIZES.len());
        assert_eq!(labels[0], "5x5x5");
    }
}
