use crate::domain::LayerWindow;

/// How the visible layer index is interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayerMode {
    /// Only the current layer is shown and pickable
    #[default]
    Single,
    /// The current layer and every layer below it
    Stacked,
}

/// Which horizontal slice of the lattice the user is working on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LayerView {
    pub layer: i32,
    pub mode: LayerMode,
}

impl LayerView {
    pub fn window(&self) -> LayerWindow {
        match self.mode {
            LayerMode::Single => LayerWindow::Single(self.layer),
            LayerMode::Stacked => LayerWindow::UpTo(self.layer),
        }
    }

    /// Move one layer up, stopping at the top of the lattice
    pub fn show_next(&mut self, bound: i32) {
        if self.layer < bound - 1 {
            self.layer += 1;
        }
    }

    /// Move one layer down, stopping at 0
    pub fn hide_top(&mut self) {
        if self.layer > 0 {
            self.layer -= 1;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LayerMode::Single => LayerMode::Stacked,
            LayerMode::Stacked => LayerMode::Single,
        };
    }

    pub fn is_visible(&self, y: i32) -> bool {
        self.window().contains(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_stays_in_lattice() {
        let mut view = LayerView::default();
        view.hide_top();
        assert_eq!(view.layer, 0);

        for _ in 0..10 {
            view.show_next(4);
        }
        assert_eq!(view.layer, 3);
    }

    #[test]
    fn test_window_follows_mode() {
        let mut view = LayerView { layer: 2, mode: LayerMode::Single };
        assert_eq!(view.window(), LayerWindow::Single(2));
        assert!(!view.is_visible(1));

        view.toggle_mode();
        assert_eq!(view.window(), LayerWindow::UpTo(2));
        assert!(view.is_visible(0));
        assert!(!view.is_visible(3));
    }
}
