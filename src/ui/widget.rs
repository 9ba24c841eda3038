// Copyright (c) 2024 Mike Tsao

use crate::types::WidgetBox;

/// Anything that occupies a rectangle in a panel or menu. Positions are
/// relative to the parent.
pub trait Widget: core::fmt::Debug + Send {
    /// The widget's position and size.
    fn bounds(&self) -> &WidgetBox;

    /// Parents use this to place and size their children.
    fn bounds_mut(&mut self) -> &mut WidgetBox;

    /// Invisible widgets take up no space in a layout.
    fn is_visible(&self) -> bool {
        true
    }

    /// Called once per frame, before anything is drawn.
    fn step(&mut self) {}
}
