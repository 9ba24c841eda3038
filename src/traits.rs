// Copyright (c) 2024 Mike Tsao

//! The traits that define many characteristics and relationships among parts of
//! the system.

use crate::{midi::MidiInputMessage, prelude::*};
use crossbeam::channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{
        ActionKey, Configurable, HandlesMidi, HasMetadata, HasSettings, LearnsNotes, Module,
        ModuleAction, PersistsData, ProducesVoltages, ProvidesActions, ProvidesService, Ticks,
    };
}

/// Something that is [Configurable] is interested in staying in sync with
/// global configuration.
pub trait Configurable {
    /// Returns this item's sample rate.
    fn sample_rate(&self) -> SampleRate {
        SampleRate::DEFAULT
    }

    /// The sample rate changed.
    #[allow(unused_variables)]
    fn update_sample_rate(&mut self, sample_rate: SampleRate) {}

    /// Sent to indicate that it's time to reset internal state to what it was
    /// when the module was first created.
    fn reset(&mut self) {}
}

/// A [HasMetadata] has basic information about a [Module]. Some methods apply
/// to the "class" of [Module] (every MIDI-to-trigger converter shares one
/// key), and others apply to each instance (one might be Uid 42, another 43).
pub trait HasMetadata {
    /// The [Uid] identifies this instance within its rack.
    fn uid(&self) -> Uid;
    /// Assigns a [Uid].
    fn set_uid(&mut self, uid: Uid);
    /// A string that describes this class of [Module]. Suitable for debugging
    /// or quick-and-dirty UIs.
    fn name(&self) -> &'static str;
    /// A kebab-case string that identifies this class of [Module]. Patches
    /// store it so that the right model can be found at load time.
    fn key(&self) -> &'static str;
}

/// Indicates that a module knows about MIDI.
pub trait HandlesMidi {
    /// Handles one MIDI message right away, outside the usual queue.
    #[allow(unused_variables)]
    fn handle_midi_message(&mut self, message: &MidiInputMessage) {}

    /// Returns a handle for delivering MIDI to this module's input queue, if it
    /// has one. Messages sent here are processed at the next tick.
    fn midi_input_sender(&self) -> Option<Sender<MidiInputMessage>> {
        None
    }
}

/// Something that [Ticks] advances by one audio sample at a time.
pub trait Ticks {
    /// Advances the module by one sample. `sample_time` is the wall-clock
    /// duration of that sample.
    #[allow(unused_variables)]
    fn tick(&mut self, sample_time: Seconds) {}
}

/// Modules with output jacks report the voltage on each jack after every tick.
pub trait ProducesVoltages {
    /// The current output voltages, indexed by output jack.
    fn outputs(&self) -> &[Voltage] {
        &[]
    }
}

/// A module whose note mappings can be taught by playing a note.
///
/// At most one slot is learning at a time. The next note-on that arrives
/// becomes that slot's note, and learning ends.
pub trait LearnsNotes {
    /// The note assigned to each slot.
    fn learnable_notes(&self) -> &[MidiNote] {
        &[]
    }

    /// The slot that is waiting for a note, if any.
    fn learning_slot(&self) -> Option<usize> {
        None
    }

    /// Makes `slot` wait for the next note. Out-of-range slots are ignored.
    #[allow(unused_variables)]
    fn begin_learning(&mut self, slot: usize) {}

    /// Stops waiting.
    fn end_learning(&mut self) {}
}

/// Identifies one of a module's [ModuleAction]s.
#[derive(Synonym, Serialize, Deserialize)]
pub struct ActionKey(String);

/// Something the user can ask a module to do, typically from its context menu.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleAction {
    /// Passed back to [ProvidesActions::perform_action()].
    pub key: ActionKey,
    /// What the menu shows.
    pub label: String,
    /// For toggles, whether the option is currently on.
    pub is_checked: Option<bool>,
}

/// Modules expose their user-facing actions through this capability instead of
/// requiring the UI to know their concrete type.
pub trait ProvidesActions {
    /// Lists the actions this module currently offers.
    fn actions(&self) -> Vec<ModuleAction> {
        Vec::default()
    }

    /// Performs the action. Returns false if the key isn't recognized.
    #[allow(unused_variables)]
    fn perform_action(&mut self, key: &ActionKey) -> bool {
        false
    }
}

/// Module state that belongs in a saved patch.
pub trait PersistsData {
    /// Returns the module's state, or `None` if it has nothing to save.
    fn data_to_json(&self) -> Option<serde_json::Value> {
        None
    }

    /// Restores state produced by [PersistsData::data_to_json()]. Every field
    /// is optional; missing or malformed fields keep their current values.
    #[allow(unused_variables)]
    fn data_from_json(&mut self, data: &serde_json::Value) {}
}

/// Each app should have a Settings struct that is composed of subsystems having
/// their own settings. Implementing [HasSettings] helps the composed struct
/// manage its parts.
pub trait HasSettings {
    /// Whether the current state of this struct has been saved to disk.
    fn has_been_saved(&self) -> bool;
    /// Call this whenever the struct changes.
    fn needs_save(&mut self);
    /// Call this after a load() or a save().
    fn mark_clean(&mut self);
}

/// Service methods.
///
/// A service is something that usually runs in its own thread as a daemon and
/// that communicates with clients by crossbeam channels. It accepts Inputs and
/// produces Events.
pub trait ProvidesService<I: core::fmt::Debug, E: core::fmt::Debug> {
    /// The sender side of the Input channel. Use this to send commands to the
    /// service.
    fn sender(&self) -> &Sender<I>;

    /// A convenience method to send Inputs to the service.
    fn send_input(&self, input: I) {
        if let Err(e) = self.sender().try_send(input) {
            log::warn!("While sending: {e:?}");
        }
    }

    /// The receiver side of the Event channel. Integrate this into a listener
    /// loop to respond to events.
    fn receiver(&self) -> &Receiver<E>;
}

/// A [Module] is one panel in the rack: a MIDI interface, an oscillator, a
/// sequencer. Every module implements every capability trait, leaving the
/// default no-op bodies for capabilities it doesn't have, so that the host
/// never needs to know a module's concrete type.
pub trait Module:
    HasMetadata
    + Configurable
    + HandlesMidi
    + Ticks
    + ProducesVoltages
    + LearnsNotes
    + ProvidesActions
    + PersistsData
    + core::fmt::Debug
    + Send
{
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::util::CrossbeamChannel;
    use std::time::Duration;

    #[derive(Debug)]
    enum TestServiceInput {
        Add(u8, u8),
    }

    #[derive(Debug, PartialEq)]
    enum TestServiceEvent {
        Added(u8),
    }

    #[derive(Debug)]
    struct TestService {
        inputs: CrossbeamChannel<TestServiceInput>,
        events: CrossbeamChannel<TestServiceEvent>,
    }
    impl Default for TestService {
        fn default() -> Self {
            let r = Self {
                inputs: Default::default(),
                events: Default::default(),
            };

            let receiver = r.inputs.receiver.clone();
            let sender = r.events.sender.clone();
            std::thread::spawn(move || {
                while let Ok(input) = receiver.recv() {
                    match input {
                        TestServiceInput::Add(a, b) => {
                            let _ = sender.send(TestServiceEvent::Added(a + b));
                        }
                    }
                }
            });

            r
        }
    }
    impl ProvidesService<TestServiceInput, TestServiceEvent> for TestService {
        fn sender(&self) -> &Sender<TestServiceInput> {
            &self.inputs.sender
        }

        fn receiver(&self) -> &Receiver<TestServiceEvent> {
            &self.events.receiver
        }
    }

    #[test]
    fn provides_service() {
        let s = TestService::default();
        s.send_input(TestServiceInput::Add(1, 2));
        assert_eq!(
            s.receiver().recv_timeout(Duration::from_secs(1)),
            Ok(TestServiceEvent::Added(3))
        );
    }

    /// Checks the behavior every [Module] must have regardless of what it does.
    pub(crate) fn validate_module(module: &mut dyn Module) {
        let uid = Uid(12345);
        module.set_uid(uid);
        assert_eq!(module.uid(), uid, "{}: uid should be settable", module.key());
        assert!(!module.name().is_empty());
        assert!(!module.key().is_empty());

        module.update_sample_rate(SampleRate(22050));
        assert_eq!(module.sample_rate(), SampleRate(22050));

        for _ in 0..16 {
            module.tick(SampleRate(22050).sample_time());
        }
        assert!(
            module.outputs().iter().all(|v| *v == Voltage::ZERO),
            "{}: a module with no input should be silent",
            module.key()
        );

        if let Some(data) = module.data_to_json() {
            module.data_from_json(&data);
            assert_eq!(
                module.data_to_json(),
                Some(data),
                "{}: restoring saved data should be a no-op",
                module.key()
            );
        }
        module.data_from_json(&serde_json::Value::Null);
    }
}
