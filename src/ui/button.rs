use macroquad::prelude::*;

const FONT_SIZE: u16 = 18;

/// Panel button with hover and click detection
#[derive(Clone)]
pub struct Button {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    label: String,
    color: Color,
    hover_color: Color,
    /// Drawn highlighted, e.g. Play/Pause while running
    active: bool,
}

impl Button {
    pub fn new(x: f32, y: f32, width: f32, height: f32, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            label: label.into(),
            color: Color::from_rgba(70, 130, 180, 255),
            hover_color: Color::from_rgba(100, 149, 237, 255),
            active: false,
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_hovered(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + self.height
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        let color = if self.is_hovered(mouse_pos) {
            self.hover_color
        } else if self.active {
            Color::from_rgba(40, 160, 110, 255)
        } else {
            self.color
        };

        draw_rectangle(self.x, self.y, self.width, self.height, color);
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, WHITE);

        let text_size = measure_text(&self.label, None, FONT_SIZE, 1.0);
        draw_text(
            &self.label,
            self.x + (self.width - text_size.width) / 2.0,
            self.y + (self.height + text_size.height) / 2.0,
            FONT_SIZE as f32,
            WHITE,
        );
    }

    /// Check if button was clicked this frame
    pub fn is_clicked(&self, mouse_pos: (f32, f32)) -> bool {
        self.is_hovered(mouse_pos) && is_mouse_button_pressed(MouseButton::Left)
    }
}
