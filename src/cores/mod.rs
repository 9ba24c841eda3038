// Copyright (c) 2024 Mike Tsao

//! Module logic without the overhead that the rest of the system needs to use
//! it. A core plus that overhead (a [Uid][crate::types::Uid], a MIDI input queue, persistence) is
//! a [Module][crate::traits::Module]. Cores exist separately so that it's
//! easier to focus on business logic when developing a new module.

pub use midi_trigger::{
    GateSlot, MidiTriggerCore, MidiTriggerCoreBuilder, MidiTriggerCoreBuilderError,
    MIDI_TRIGGER_SLOT_COUNT,
};

mod midi_trigger;
