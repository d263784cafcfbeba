use macroquad::math::Vec3;

use crate::domain::Proxy;

/// Drawable cube standing in for one living cell
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellProxy {
    pub position: Vec3,
    pub visible: bool,
}

impl Proxy for CellProxy {
    fn place(&mut self, position: Vec3) {
        self.position = position;
        self.visible = true;
    }

    fn deactivate(&mut self) {
        self.visible = false;
    }
}
