// Copyright (c) 2024 Mike Tsao

//! Provides MIDI interface services.

use crossbeam::channel::{Receiver, Sender};
use midir::{Ignore, MidiInput, MidiInputConnection};
use midly::{live::LiveEvent, MidiMessage};
use patchbay::{midi::MidiInputMessage, prelude::*, types::MidiPortDescriptor};
use std::sync::{Arc, Mutex};

/// The name this app gives itself when it registers with the system's MIDI
/// layer.
const CLIENT_NAME: &str = "patchbay";

/// The client sends requests to the MIDI interface through [MidiServiceInput]
/// messages.
///
/// "input" is from the perspective of the MIDI interface. When the user
/// presses a key on a keyboard, the message goes *in* to the interface's input
/// port and then to the PC.
#[derive(Clone, Debug)]
pub enum MidiServiceInput {
    /// Requests a rescan of the MIDI input ports.
    RefreshPorts,

    /// The user has picked a MIDI input. Switch to it.
    SelectMidiInput(MidiPortDescriptor),

    /// Attempt to set the selected MIDI input by matching a text description,
    /// usually the one remembered in [MidiSettings](patchbay::util::MidiSettings).
    RestoreMidiInput(String),

    /// Forward every short message from the selected input to this sender,
    /// typically the one returned by
    /// [HandlesMidi::midi_input_sender()](patchbay::traits::HandlesMidi::midi_input_sender()).
    /// Subscribers whose receivers have gone away are dropped.
    Subscribe(Sender<MidiInputMessage>),

    /// The app is ready to quit, so the service should end.
    Quit,
}

/// The service provides updates to the client through [MidiServiceEvent]
/// messages.
#[derive(Clone, Debug)]
pub enum MidiServiceEvent {
    /// The MIDI input ports have been updated.
    InputPorts(Vec<MidiPortDescriptor>),

    /// A new input port has been selected, or the old one was closed.
    InputPortSelected(Option<MidiPortDescriptor>),

    /// A MIDI message has arrived from external hardware.
    Midi(MidiChannel, MidiMessage),

    /// The MIDI engine has successfully processed [MidiServiceInput::Quit], and
    /// the service will go away shortly.
    Quit,
}

type Subscribers = Arc<Mutex<Vec<Sender<MidiInputMessage>>>>;

/// Wraps the [midir](https://crates.io/crates/midir) crate with a
/// crossbeam-channels interface.
#[derive(Debug)]
pub struct MidiService {
    inputs: CrossbeamChannel<MidiServiceInput>,
    events: CrossbeamChannel<MidiServiceEvent>,
}
impl Default for MidiService {
    fn default() -> Self {
        Self::new()
    }
}
impl MidiService {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        let r = Self {
            inputs: Default::default(),
            events: Default::default(),
        };

        r.start_thread();
        r
    }

    fn start_thread(&self) {
        let receiver = self.inputs.receiver.clone();
        let events = self.events.sender.clone();
        std::thread::spawn(move || {
            let mut interface = MidiInterface::new_with(events.clone());
            while let Ok(input) = receiver.recv() {
                match input {
                    MidiServiceInput::RefreshPorts => interface.refresh_ports(),
                    MidiServiceInput::SelectMidiInput(port) => interface.select_input(&port),
                    MidiServiceInput::RestoreMidiInput(name) => interface.restore_input(&name),
                    MidiServiceInput::Subscribe(sender) => interface.subscribe(sender),
                    MidiServiceInput::Quit => {
                        interface.close();
                        let _ = events.send(MidiServiceEvent::Quit);
                        break;
                    }
                }
            }
            log::debug!("MIDI service thread exiting");
        });
    }
}
impl ProvidesService<MidiServiceInput, MidiServiceEvent> for MidiService {
    fn sender(&self) -> &Sender<MidiServiceInput> {
        &self.inputs.sender
    }

    fn receiver(&self) -> &Receiver<MidiServiceEvent> {
        &self.events.receiver
    }
}

/// Lives on the service thread and owns the midir connection.
struct MidiInterface {
    events: Sender<MidiServiceEvent>,
    subscribers: Subscribers,
    connection: Option<MidiInputConnection<()>>,
}
impl MidiInterface {
    fn new_with(events: Sender<MidiServiceEvent>) -> Self {
        Self {
            events,
            subscribers: Default::default(),
            connection: None,
        }
    }

    fn input_ports() -> anyhow::Result<Vec<MidiPortDescriptor>> {
        let midi_input = MidiInput::new(CLIENT_NAME)?;
        Ok(midi_input
            .ports()
            .iter()
            .enumerate()
            .map(|(index, port)| MidiPortDescriptor {
                index,
                name: midi_input
                    .port_name(port)
                    .unwrap_or_else(|_| format!("Input {index}")),
            })
            .collect())
    }

    fn refresh_ports(&mut self) {
        let ports = match Self::input_ports() {
            Ok(ports) => ports,
            Err(e) => {
                log::warn!("Couldn't enumerate MIDI inputs: {e:?}");
                Vec::default()
            }
        };
        let _ = self.events.send(MidiServiceEvent::InputPorts(ports));
    }

    fn connect(&mut self, descriptor: &MidiPortDescriptor) -> anyhow::Result<()> {
        let mut midi_input = MidiInput::new(CLIENT_NAME)?;
        midi_input.ignore(Ignore::None);
        let ports = midi_input.ports();
        let port = ports
            .get(descriptor.index)
            .ok_or_else(|| anyhow::anyhow!("MIDI input {descriptor} is no longer present"))?;

        let events = self.events.clone();
        let subscribers = Arc::clone(&self.subscribers);
        let connection = midi_input
            .connect(
                port,
                "patchbay-input",
                move |timestamp, bytes, _| dispatch(timestamp, bytes, &events, &subscribers),
                (),
            )
            .map_err(|e| anyhow::anyhow!("Couldn't connect to MIDI input {descriptor}: {e}"))?;

        // Replacing the old connection drops it, which closes the port.
        self.connection = Some(connection);
        Ok(())
    }

    fn select_input(&mut self, descriptor: &MidiPortDescriptor) {
        match self.connect(descriptor) {
            Ok(_) => {
                log::info!("Listening to MIDI input {descriptor}");
                let _ = self
                    .events
                    .send(MidiServiceEvent::InputPortSelected(Some(descriptor.clone())));
            }
            Err(e) => {
                log::warn!("{e:?}");
                self.close();
            }
        }
    }

    fn restore_input(&mut self, name: &str) {
        match Self::input_ports() {
            Ok(ports) => {
                if let Some(port) = ports.iter().find(|p| p.name == name) {
                    self.select_input(port);
                } else {
                    log::info!("Remembered MIDI input {name} isn't connected");
                }
            }
            Err(e) => log::warn!("Couldn't enumerate MIDI inputs: {e:?}"),
        }
    }

    fn subscribe(&mut self, sender: Sender<MidiInputMessage>) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(sender);
        }
    }

    fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            let _ = connection.close();
            let _ = self.events.send(MidiServiceEvent::InputPortSelected(None));
        }
    }
}

/// Handles raw bytes from the device. Runs on midir's callback thread.
fn dispatch(
    timestamp: u64,
    bytes: &[u8],
    events: &Sender<MidiServiceEvent>,
    subscribers: &Mutex<Vec<Sender<MidiInputMessage>>>,
) {
    match LiveEvent::parse(bytes) {
        Ok(LiveEvent::Midi { channel, message }) => {
            let channel = MidiChannel::from(channel);
            // Queue first, so that whoever handles the event finds the message
            // already waiting.
            let queued = MidiInputMessage::from((channel, message)).with_timestamp(timestamp);
            if let Ok(mut subscribers) = subscribers.lock() {
                subscribers.retain(|s| s.send(queued).is_ok());
            }
            let _ = events.send(MidiServiceEvent::Midi(channel, message));
        }
        // Clock, sysex, and friends aren't interesting to modules.
        Ok(_) => {}
        Err(e) => log::debug!("Ignoring unparseable MIDI bytes {bytes:?}: {e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn dispatch_fans_out_to_subscribers() {
        let events: CrossbeamChannel<MidiServiceEvent> = Default::default();
        let subscribers: Subscribers = Default::default();
        let (live_sender, live_receiver) = crossbeam::channel::unbounded();
        let (dead_sender, dead_receiver) = crossbeam::channel::unbounded();
        drop(dead_receiver);
        {
            let mut s = subscribers.lock().unwrap();
            s.push(live_sender);
            s.push(dead_sender);
        }

        dispatch(1234, &[0x91, 60, 100], &events.sender, &subscribers);

        let received = live_receiver.try_recv().unwrap();
        assert_eq!(received.bytes, [0x91, 60, 100]);
        assert_eq!(received.timestamp, 1234);
        assert_eq!(received.channel(), MidiChannel(1));
        assert!(matches!(
            events.receiver.try_recv(),
            Ok(MidiServiceEvent::Midi(MidiChannel(1), MidiMessage::NoteOn { .. }))
        ));
        assert_eq!(
            subscribers.lock().unwrap().len(),
            1,
            "subscriber with a dropped receiver should be pruned"
        );
    }

    #[test]
    fn subscribers_are_fed_before_the_event() {
        let events: CrossbeamChannel<MidiServiceEvent> = Default::default();
        let subscribers: Subscribers = Default::default();
        let (sender, receiver) = crossbeam::channel::unbounded();
        subscribers.lock().unwrap().push(sender);

        let event_sender = events.sender.clone();
        let handle = std::thread::spawn(move || {
            dispatch(7, &[0x90, 36, 127], &event_sender, &subscribers);
        });
        assert!(matches!(
            events.receiver.recv_timeout(Duration::from_secs(5)),
            Ok(MidiServiceEvent::Midi(..))
        ));
        assert_eq!(
            receiver.try_recv().map(|m| m.note()),
            Ok(MidiNote(36)),
            "the module queue should already hold the message"
        );
        let _ = handle.join();
    }

    #[test]
    fn dispatch_ignores_non_channel_messages() {
        let events: CrossbeamChannel<MidiServiceEvent> = Default::default();
        let subscribers: Subscribers = Default::default();
        let (sender, receiver) = crossbeam::channel::unbounded();
        subscribers.lock().unwrap().push(sender);

        // Timing clock, then a truncated note-on.
        dispatch(0, &[0xf8], &events.sender, &subscribers);
        dispatch(0, &[0x90, 60], &events.sender, &subscribers);
        assert!(receiver.try_recv().is_err());
        assert!(events.receiver.try_recv().is_err());
    }

    #[test]
    fn midi_service_quits() {
        let s = MidiService::default();
        let (sender, _receiver) = crossbeam::channel::unbounded();
        s.send_input(MidiServiceInput::Subscribe(sender));
        s.send_input(MidiServiceInput::Quit);
        assert!(matches!(
            s.receiver().recv_timeout(Duration::from_secs(5)),
            Ok(MidiServiceEvent::Quit)
        ));
    }
}
