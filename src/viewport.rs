/*
 * Viewport Module
 *
 * The drawable area handed to the simulation by the host every tick.
 * World coordinates run from (0, 0) in the top-left corner to
 * (width, height), matching window pixel coordinates.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width as f32
    }

    pub fn height(&self) -> f32 {
        self.height as f32
    }
}
