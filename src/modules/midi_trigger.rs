// Copyright (c) 2024 Mike Tsao

use crate::{
    cores::{MidiTriggerCore, MIDI_TRIGGER_SLOT_COUNT},
    midi::{MidiInputMessage, MidiInputQueue},
    prelude::*,
};
use crossbeam::channel::Sender;
use delegate::delegate;
use serde_json::{json, Value};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// The things a user can do to a [MidiTriggerToCv] from its context menu.
#[derive(Clone, Copy, Debug, PartialEq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum MidiTriggerAction {
    /// Switches outputs between a fixed 10V and a level that follows velocity.
    ToggleVelocity,
}
impl MidiTriggerAction {
    #[allow(missing_docs)]
    pub fn key(&self) -> ActionKey {
        ActionKey::from(<&'static str>::from(self))
    }

    #[allow(missing_docs)]
    pub fn label(&self) -> &'static str {
        match self {
            MidiTriggerAction::ToggleVelocity => "Velocity",
        }
    }
}

/// A sixteen-output MIDI interface that turns notes into trigger pulses.
#[derive(Debug, Default)]
pub struct MidiTriggerToCv {
    uid: Uid,
    inner: MidiTriggerCore,
    midi_input: MidiInputQueue,
}
impl MidiTriggerToCv {
    /// The [ModelKey][crate::modules::ModelKey] under which this module is
    /// registered and saved.
    pub const MODEL_KEY: &'static str = "midi-trigger-to-cv";
    #[allow(missing_docs)]
    pub const MODEL_NAME: &'static str = "MIDI-Trigger-to-CV";

    #[allow(missing_docs)]
    pub fn new_with(uid: Uid, inner: MidiTriggerCore) -> Self {
        Self {
            uid,
            inner,
            midi_input: Default::default(),
        }
    }

    #[allow(missing_docs)]
    pub fn inner(&self) -> &MidiTriggerCore {
        &self.inner
    }

    #[allow(missing_docs)]
    pub fn inner_mut(&mut self) -> &mut MidiTriggerCore {
        &mut self.inner
    }

    /// The queue that feeds this module. Its settings pick the device and
    /// channel.
    pub fn midi_input(&self) -> &MidiInputQueue {
        &self.midi_input
    }

    #[allow(missing_docs)]
    pub fn midi_input_mut(&mut self) -> &mut MidiInputQueue {
        &mut self.midi_input
    }

    fn is_action_checked(&self, action: MidiTriggerAction) -> bool {
        match action {
            MidiTriggerAction::ToggleVelocity => self.inner.is_velocity_sensitive(),
        }
    }
}
impl HasMetadata for MidiTriggerToCv {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn set_uid(&mut self, uid: Uid) {
        self.uid = uid;
    }

    fn name(&self) -> &'static str {
        Self::MODEL_NAME
    }

    fn key(&self) -> &'static str {
        Self::MODEL_KEY
    }
}
impl Configurable for MidiTriggerToCv {
    delegate! {
        to self.inner {
            fn sample_rate(&self) -> SampleRate;
            fn update_sample_rate(&mut self, sample_rate: SampleRate);
        }
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.midi_input.clear();
    }
}
impl HandlesMidi for MidiTriggerToCv {
    fn handle_midi_message(&mut self, message: &MidiInputMessage) {
        if self.midi_input.settings().accepts(message.channel()) {
            self.inner.handle_message(message);
        }
    }

    fn midi_input_sender(&self) -> Option<Sender<MidiInputMessage>> {
        Some(self.midi_input.sender())
    }
}
impl Ticks for MidiTriggerToCv {
    fn tick(&mut self, sample_time: Seconds) {
        while let Some(message) = self.midi_input.shift() {
            self.inner.handle_message(&message);
        }
        self.inner.tick(sample_time);
    }
}
impl ProducesVoltages for MidiTriggerToCv {
    delegate! {
        to self.inner {
            fn outputs(&self) -> &[Voltage];
        }
    }
}
impl LearnsNotes for MidiTriggerToCv {
    delegate! {
        to self.inner {
            fn learnable_notes(&self) -> &[MidiNote];
            fn learning_slot(&self) -> Option<usize>;
            fn begin_learning(&mut self, slot: usize);
            fn end_learning(&mut self);
        }
    }
}
impl ProvidesActions for MidiTriggerToCv {
    fn actions(&self) -> Vec<ModuleAction> {
        MidiTriggerAction::iter()
            .map(|action| ModuleAction {
                key: action.key(),
                label: action.label().to_string(),
                is_checked: Some(self.is_action_checked(action)),
            })
            .collect()
    }

    fn perform_action(&mut self, key: &ActionKey) -> bool {
        match MidiTriggerAction::iter().find(|action| action.key() == *key) {
            Some(MidiTriggerAction::ToggleVelocity) => {
                let is_velocity_sensitive = !self.inner.is_velocity_sensitive();
                self.inner.set_velocity_sensitive(is_velocity_sensitive);
                true
            }
            None => false,
        }
    }
}
impl PersistsData for MidiTriggerToCv {
    fn data_to_json(&self) -> Option<Value> {
        let notes: Vec<u8> = self.inner.notes().iter().map(|n| n.0).collect();
        Some(json!({
            "notes": notes,
            "midi": self.midi_input.to_json(),
            "velocity": self.inner.is_velocity_sensitive(),
        }))
    }

    fn data_from_json(&mut self, data: &Value) {
        if let Some(notes) = data.get("notes").and_then(Value::as_array) {
            for (slot, note) in notes.iter().take(MIDI_TRIGGER_SLOT_COUNT).enumerate() {
                // Out-of-range numbers are kept as their low byte.
                if let Some(note) = note.as_i64() {
                    self.inner.set_note(slot, MidiNote(note as u8));
                }
            }
        }
        if let Some(midi) = data.get("midi") {
            self.midi_input.from_json(midi);
        }
        if let Some(velocity) = data.get("velocity").and_then(Value::as_bool) {
            self.inner.set_velocity_sensitive(velocity);
        }
    }
}
impl Module for MidiTriggerToCv {}
