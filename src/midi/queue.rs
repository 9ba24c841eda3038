// Copyright (c) 2024 Mike Tsao

use super::MidiInputMessage;
use crate::{types::MidiChannel, util::CrossbeamChannel};
use crossbeam::channel::{Sender, TryRecvError};
use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// Which device and channel a [MidiInputQueue] listens to. This is saved with
/// each module that owns a queue, so a patch reopens with the same input.
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct MidiInputSettings {
    /// The name of the backend that delivers messages.
    #[derivative(Default(value = "Self::DEFAULT_DRIVER.to_string()"))]
    pub driver: String,

    /// The human-readable name of the input port, if one was chosen.
    pub device_name: Option<String>,

    /// Accept only this channel. `None` accepts every channel.
    pub channel: Option<MidiChannel>,
}
impl MidiInputSettings {
    /// The driver that a fresh queue uses.
    pub const DEFAULT_DRIVER: &'static str = "midir";

    /// Whether a message on `channel` passes the channel filter.
    pub fn accepts(&self, channel: MidiChannel) -> bool {
        self.channel.map_or(true, |c| c == channel)
    }
}

/// A first-in, first-out queue of incoming MIDI messages.
///
/// Producers (a device callback, a test, another thread) hold clones of
/// [MidiInputQueue::sender()]. The owning module drains the queue with
/// [MidiInputQueue::shift()] once per tick.
#[derive(Debug, Default)]
pub struct MidiInputQueue {
    settings: MidiInputSettings,
    channel: CrossbeamChannel<MidiInputMessage>,
}
impl MidiInputQueue {
    /// Returns a handle that can push messages into this queue from anywhere.
    pub fn sender(&self) -> Sender<MidiInputMessage> {
        self.channel.sender.clone()
    }

    /// Enqueues a message.
    pub fn push(&self, message: MidiInputMessage) {
        // The queue owns its receiver, so the channel can't be disconnected.
        let _ = self.channel.sender.send(message);
    }

    /// Pops the oldest pending message that passes the channel filter.
    /// Returns `None` once nothing is pending.
    pub fn shift(&mut self) -> Option<MidiInputMessage> {
        loop {
            match self.channel.receiver.try_recv() {
                Ok(message) => {
                    if self.settings.accepts(message.channel()) {
                        return Some(message);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// The number of messages waiting, including ones that the channel filter
    /// will drop.
    pub fn len(&self) -> usize {
        self.channel.receiver.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.channel.receiver.is_empty()
    }

    /// Discards everything pending.
    pub fn clear(&mut self) {
        while self.channel.receiver.try_recv().is_ok() {}
    }

    #[allow(missing_docs)]
    pub fn settings(&self) -> &MidiInputSettings {
        &self.settings
    }

    #[allow(missing_docs)]
    pub fn settings_mut(&mut self) -> &mut MidiInputSettings {
        &mut self.settings
    }

    /// Serializes the queue's settings. Pending messages aren't saved.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.settings).unwrap_or_default()
    }

    /// Restores settings saved by [MidiInputQueue::to_json()]. Anything that
    /// doesn't parse leaves the current settings alone.
    pub fn from_json(&mut self, value: &serde_json::Value) {
        match serde_json::from_value::<MidiInputSettings>(value.clone()) {
            Ok(settings) => self.settings = settings,
            Err(e) => log::warn!("ignoring malformed MIDI input settings: {e}"),
        }
    }
}
