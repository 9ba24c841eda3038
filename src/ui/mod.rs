// Copyright (c) 2024 Mike Tsao

//! Toolkit-independent widget geometry: a [Widget] trait that knows its box
//! and visibility, a [List] that stacks widgets vertically, and the
//! [ContextMenu] that modules offer on right-click.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{ContextMenu, List, MenuEntry, MenuItem, MenuRow, Widget};
}

pub use {
    list::List,
    menu::{ContextMenu, MenuEntry, MenuItem, MenuRow},
    widget::Widget,
};

mod list;
mod menu;
mod widget;
