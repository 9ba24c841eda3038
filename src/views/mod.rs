// Copyright (c) 2024 Mike Tsao

//! The panel side of each module. A view holds only presentation state: which
//! widget is selected, where the jacks are. Everything it shows comes from the
//! [Module] it's handed each frame.

use crate::{traits::Module, ui::ContextMenu};

/// The most commonly used imports.
pub mod prelude {
    pub use super::{MidiTriggerPanel, ModuleView};
}

pub use midi_trigger::{MidiTriggerPanel, NoteChoice};

mod midi_trigger;

/// Draws a module's panel and turns user gestures into module calls.
pub trait ModuleView: core::fmt::Debug + Send {
    /// Refreshes presentation state from the module. Call once per frame.
    #[allow(unused_variables)]
    fn step(&mut self, module: &mut dyn Module) {}

    /// The menu to show when the panel is right-clicked.
    fn context_menu(&self, module: &dyn Module) -> ContextMenu {
        ContextMenu::new_for(module)
    }

    /// Renders the panel.
    #[cfg(feature = "egui")]
    fn ui(&mut self, ui: &mut eframe::egui::Ui, module: &mut dyn Module) -> eframe::egui::Response;
}
