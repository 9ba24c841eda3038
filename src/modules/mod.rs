// Copyright (c) 2024 Mike Tsao

//! Modules are what a user puts in a rack. Each one wraps a core from
//! [cores](crate::cores) with what the host needs: a [Uid](crate::types::Uid),
//! a MIDI input queue, persistence, and menu actions. The [ModelRegistry]
//! knows how to make each kind.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{BuiltInModels, MidiTriggerToCv, Model, ModelKey, ModelRegistry};
}

pub use {
    midi_trigger::{MidiTriggerAction, MidiTriggerToCv},
    registry::{BuiltInModels, Model, ModelKey, ModelRegistry, ModuleFactoryFn, ViewFactoryFn},
};

mod midi_trigger;
mod registry;
