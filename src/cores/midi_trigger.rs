// Copyright (c) 2024 Mike Tsao

use crate::{midi::MidiInputMessage, prelude::*};
use derive_builder::Builder;

/// Sixteen trigger outputs, one per slot.
pub const MIDI_TRIGGER_SLOT_COUNT: usize = 16;

/// The state of one slot's gate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GateSlot {
    /// Whether the slot's note is currently held down.
    pub is_open: bool,
    /// How much longer the output stays high. Counts down only while the gate
    /// is closed.
    pub hold_time: Seconds,
    /// The velocity of the note-on that last opened this gate.
    pub velocity: u8,
}

/// Turns MIDI notes into triggers. Each of sixteen slots is mapped to a note;
/// when that note is pressed the slot's output goes high, and when it's
/// released the output falls after a short hold, so that even a zero-length
/// note from a drum pad produces a pulse that downstream modules can see.
#[derive(Debug, Builder)]
pub struct MidiTriggerCore {
    /// The note assigned to each slot. Several slots may share a note.
    #[builder(default = "MidiTriggerCore::default_notes()")]
    notes: [MidiNote; MIDI_TRIGGER_SLOT_COUNT],

    /// Outputs follow note velocity instead of always going to 10V.
    #[builder(default)]
    is_velocity_sensitive: bool,

    #[builder(setter(skip))]
    e: MidiTriggerCoreEphemerals,
}
#[derive(Debug, Default)]
struct MidiTriggerCoreEphemerals {
    slots: [GateSlot; MIDI_TRIGGER_SLOT_COUNT],
    learning_slot: Option<usize>,
    outputs: [Voltage; MIDI_TRIGGER_SLOT_COUNT],
    sample_rate: SampleRate,
}
impl Default for MidiTriggerCore {
    fn default() -> Self {
        Self {
            notes: Self::default_notes(),
            is_velocity_sensitive: false,
            e: Default::default(),
        }
    }
}
impl MidiTriggerCore {
    /// The lowest note of the default chromatic mapping.
    pub const FIRST_DEFAULT_NOTE: MidiNote = MidiNote::C2;

    /// A gate that closes keeps its output high for at least this long.
    pub const HOLD_TIME: Seconds = Seconds::one_millisecond();

    /// Slot N maps to note 36 + N.
    pub fn default_notes() -> [MidiNote; MIDI_TRIGGER_SLOT_COUNT] {
        core::array::from_fn(|i| MidiNote(Self::FIRST_DEFAULT_NOTE.0 + i as u8))
    }

    /// The note assigned to each slot.
    pub fn notes(&self) -> &[MidiNote; MIDI_TRIGGER_SLOT_COUNT] {
        &self.notes
    }

    /// Assigns a note to a slot. Out-of-range slots are ignored.
    pub fn set_note(&mut self, slot: usize, note: MidiNote) {
        if let Some(n) = self.notes.get_mut(slot) {
            *n = note;
        }
    }

    #[allow(missing_docs)]
    pub fn is_velocity_sensitive(&self) -> bool {
        self.is_velocity_sensitive
    }

    #[allow(missing_docs)]
    pub fn set_velocity_sensitive(&mut self, is_velocity_sensitive: bool) {
        self.is_velocity_sensitive = is_velocity_sensitive;
    }

    /// The state of one slot's gate.
    pub fn slot(&self, slot: usize) -> Option<&GateSlot> {
        self.e.slots.get(slot)
    }

    /// Handles a note-on with nonzero velocity.
    ///
    /// If a slot is learning, it takes this note and stops learning, and the
    /// event is spent on the lesson: that slot's gate stays as it was. Every
    /// other slot mapped to `note` opens.
    pub fn press_note(&mut self, note: MidiNote, velocity: u8) {
        let learned_slot = self.e.learning_slot.take();
        if let Some(slot) = learned_slot {
            self.notes[slot] = note;
            log::debug!("slot {slot} learned note {}", note.label());
        }
        for (i, gate) in self.e.slots.iter_mut().enumerate() {
            if Some(i) != learned_slot && self.notes[i] == note {
                gate.is_open = true;
                gate.hold_time = Self::HOLD_TIME;
                gate.velocity = velocity;
            }
        }
    }

    /// Closes every gate mapped to `note`. Their outputs fall once the hold
    /// time runs out.
    pub fn release_note(&mut self, note: MidiNote) {
        for (i, gate) in self.e.slots.iter_mut().enumerate() {
            if self.notes[i] == note {
                gate.is_open = false;
            }
        }
    }

    /// Dispatches one message by its status nibble. Anything other than
    /// note-on and note-off is ignored.
    pub fn handle_message(&mut self, message: &MidiInputMessage) {
        match message.status() {
            MidiInputMessage::NOTE_OFF => self.release_note(message.note()),
            MidiInputMessage::NOTE_ON => {
                if message.value() > 0 {
                    self.press_note(message.note(), message.value());
                } else {
                    // Plenty of keyboards send note-on with zero velocity to
                    // mean note-off.
                    self.release_note(message.note());
                }
            }
            _ => {}
        }
    }

    fn output_level(&self, gate: &GateSlot) -> Voltage {
        if self.is_velocity_sensitive {
            Voltage::rescale(gate.velocity as f32, 0.0, 127.0, 0.0, 10.0)
        } else {
            Voltage::GATE_HIGH
        }
    }
}
impl Configurable for MidiTriggerCore {
    fn sample_rate(&self) -> SampleRate {
        self.e.sample_rate
    }

    fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.e.sample_rate = sample_rate;
    }

    /// Closes all gates, silences all outputs, cancels learning, and restores
    /// the default note mapping. Velocity sensitivity is a preference, not
    /// state, so it survives.
    fn reset(&mut self) {
        self.notes = Self::default_notes();
        self.e.slots = Default::default();
        self.e.outputs = Default::default();
        self.e.learning_slot = None;
    }
}
impl Ticks for MidiTriggerCore {
    fn tick(&mut self, sample_time: Seconds) {
        for i in 0..MIDI_TRIGGER_SLOT_COUNT {
            let gate = self.e.slots[i];
            self.e.outputs[i] = if gate.hold_time.is_positive() {
                if !gate.is_open {
                    self.e.slots[i].hold_time -= sample_time;
                }
                self.output_level(&gate)
            } else {
                Voltage::ZERO
            };
        }
    }
}
impl ProducesVoltages for MidiTriggerCore {
    fn outputs(&self) -> &[Voltage] {
        &self.e.outputs
    }
}
impl LearnsNotes for MidiTriggerCore {
    fn learnable_notes(&self) -> &[MidiNote] {
        &self.notes
    }

    fn learning_slot(&self) -> Option<usize> {
        self.e.learning_slot
    }

    fn begin_learning(&mut self, slot: usize) {
        if slot < MIDI_TRIGGER_SLOT_COUNT {
            self.e.learning_slot = Some(slot);
        } else {
            log::warn!("ignoring request to learn into nonexistent slot {slot}");
        }
    }

    fn end_learning(&mut self) {
        self.e.learning_slot = None;
    }
}
