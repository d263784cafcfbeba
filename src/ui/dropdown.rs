use macroquad::prelude::*;

const ROW_HEIGHT: f32 = 26.0;
const FONT_SIZE: u16 = 15;

/// Cut `text` down with a trailing ellipsis until it fits in `max_width`
fn fit_text(text: &str, max_width: f32) -> String {
    if measure_text(text, None, FONT_SIZE, 1.0).width <= max_width {
        return text.to_owned();
    }
    let mut truncated = text.to_owned();
    while !truncated.is_empty()
        && measure_text(&format!("{truncated}..."), None, FONT_SIZE, 1.0).width > max_width
    {
        truncated.pop();
    }
    format!("{truncated}...")
}

/// Collapsible list selector for lattice size, rule, algorithm and pattern
#[derive(Clone)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    label: String,
    items: Vec<String>,
    selected: usize,
    open: bool,
}

impl Dropdown {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            x,
            y,
            width,
            label: label.into(),
            items,
            selected: 0,
            open: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Out-of-range indices are ignored
    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Update position for responsive layout
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn row_top(&self, row: usize) -> f32 {
        self.y + ROW_HEIGHT * (row as f32 + 1.0)
    }

    fn header_hovered(&self, (mx, my): (f32, f32)) -> bool {
        mx >= self.x && mx <= self.x + self.width && my >= self.y && my <= self.y + ROW_HEIGHT
    }

    /// Index of the open list row under the cursor
    fn row_at(&self, (mx, my): (f32, f32)) -> Option<usize> {
        if !self.open || mx < self.x || mx > self.x + self.width || my < self.row_top(0) {
            return None;
        }
        let row = ((my - self.row_top(0)) / ROW_HEIGHT) as usize;
        (row < self.items.len()).then_some(row)
    }

    /// Handle clicks; returns the new index when the selection changed
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> Option<usize> {
        if !is_mouse_button_pressed(MouseButton::Left) {
            return None;
        }
        if self.header_hovered(mouse_pos) {
            self.open = !self.open;
            return None;
        }
        if !self.open {
            return None;
        }

        let picked = self.row_at(mouse_pos);
        self.open = false;
        match picked {
            Some(row) if row != self.selected => {
                self.selected = row;
                Some(row)
            }
            _ => None,
        }
    }

    /// True when a click at `mouse_pos` belongs to this widget
    pub fn captures(&self, mouse_pos: (f32, f32)) -> bool {
        self.header_hovered(mouse_pos) || self.row_at(mouse_pos).is_some()
    }

    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(&self.label, self.x, self.y - 5.0, 14.0, GRAY);

        let header_color = if self.header_hovered(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_rectangle(self.x, self.y, self.width, ROW_HEIGHT, header_color);
        draw_rectangle_lines(self.x, self.y, self.width, ROW_HEIGHT, 2.0, WHITE);

        let current = self.items.get(self.selected).map(String::as_str).unwrap_or("");
        draw_text(
            &fit_text(current, self.width - 28.0),
            self.x + 5.0,
            self.y + 18.0,
            FONT_SIZE as f32,
            WHITE,
        );
        draw_text(if self.open { "^" } else { "v" }, self.x + self.width - 16.0, self.y + 18.0, 14.0, WHITE);

        if !self.open {
            return;
        }

        let hovered = self.row_at(mouse_pos);
        let list_height = self.items.len() as f32 * ROW_HEIGHT;
        draw_rectangle(self.x, self.row_top(0), self.width, list_height, Color::from_rgba(30, 30, 30, 255));

        for (i, item) in self.items.iter().enumerate() {
            let top = self.row_top(i);
            let color = if hovered == Some(i) {
                Color::from_rgba(100, 149, 237, 255)
            } else if i == self.selected {
                Color::from_rgba(50, 100, 150, 255)
            } else {
                Color::from_rgba(45, 45, 45, 255)
            };
            draw_rectangle(self.x, top, self.width, ROW_HEIGHT, color);
            draw_rectangle_lines(self.x, top, self.width, ROW_HEIGHT, 1.0, Color::from_rgba(80, 80, 80, 255));
            draw_text(&fit_text(item, self.width - 10.0), self.x + 5.0, top + 18.0, FONT_SIZE as f32, WHITE);
        }

        draw_rectangle_lines(self.x, self.row_top(0), self.width, list_height, 2.0, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> Dropdown {
        let items = vec!["5".to_owned(), "10".to_owned(), "20".to_owned()];
        Dropdown::new(0.0, 100.0, 200.0, "Lattice Size", items)
    }

    #[test]
    fn test_rows_only_when_open() {
        let mut dropdown = sizes();
        let second_row = (50.0, 100.0 + ROW_HEIGHT * 2.5);

        assert_eq!(dropdown.row_at(second_row), None);
        dropdown.open = true;
        assert_eq!(dropdown.row_at(second_row), Some(1));
        assert!(dropdown.captures(second_row));
        assert_eq!(dropdown.row_at((50.0, 100.0 + ROW_HEIGHT * 10.0)), None);
    }

    #[test]
    fn test_set_selected_ignores_out_of_range() {
        let mut dropdown = sizes();
        dropdown.set_selected(2);
        dropdown.set_selected(7);
        assert_eq!(dropdown.selected(), 2);
    }
}
