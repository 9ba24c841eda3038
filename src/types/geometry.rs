// Copyright (c) 2024 Mike Tsao

//! Screen-space geometry for panels and widgets.

use derive_more::{Add, Sub};
use serde::{Deserialize, Serialize};

/// A 2D point or extent, in pixels.
#[derive(Add, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Sub)]
pub struct Vec2 {
    #[allow(missing_docs)]
    pub x: f32,
    #[allow(missing_docs)]
    pub y: f32,
}
impl Vec2 {
    #[allow(missing_docs)]
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[allow(missing_docs)]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts millimeters (the unit panel artwork is drawn in) to pixels.
    pub fn from_mm(x: f32, y: f32) -> Self {
        Self::new(mm_to_px(x), mm_to_px(y))
    }
}

/// The width of one rack unit ("HP") in pixels.
pub const RACK_GRID_WIDTH: f32 = 15.0;
/// The height of a panel in pixels.
pub const RACK_GRID_HEIGHT: f32 = 380.0;

/// One HP is 5.08mm, and one HP is [RACK_GRID_WIDTH] pixels.
pub fn mm_to_px(mm: f32) -> f32 {
    mm * (RACK_GRID_WIDTH / 5.08)
}

/// The position and size of a widget, relative to its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetBox {
    /// Top-left corner.
    pub pos: Vec2,
    #[allow(missing_docs)]
    pub size: Vec2,
}
impl WidgetBox {
    #[allow(missing_docs)]
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Bottom-right corner.
    pub fn end(&self) -> Vec2 {
        self.pos + self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn one_hp_in_mm_is_one_grid_width() {
        assert!(approx_eq!(f32, mm_to_px(5.08), RACK_GRID_WIDTH, ulps = 2));
    }

    #[test]
    fn box_end() {
        let b = WidgetBox::new(Vec2::new(1.0, 2.0), Vec2::new(10.0, 20.0));
        assert_eq!(b.end(), Vec2::new(11.0, 22.0));
        assert_eq!(b.end() - b.pos, b.size);
    }
}
