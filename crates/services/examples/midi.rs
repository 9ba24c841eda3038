// Copyright (c) 2024 Mike Tsao

//! Lists MIDI inputs, connects to the first one, and feeds a MIDI-Trigger-to-CV
//! module until middle C is released.

use midly::MidiMessage;
use patchbay::{modules::MidiTriggerToCv, prelude::*};
use patchbay_services::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Keep the service in scope even though we only talk to it through its
    // channels. Dropping it would end the thread.
    let service = MidiService::default();
    let sender = service.sender().clone();
    let receiver = service.receiver().clone();

    let mut module = MidiTriggerToCv::new_with(Uid(1), Default::default());
    if let Some(midi_sender) = module.midi_input_sender() {
        let _ = sender.send(MidiServiceInput::Subscribe(midi_sender));
    }
    let _ = sender.send(MidiServiceInput::RefreshPorts);

    while let Ok(event) = receiver.recv() {
        match event {
            MidiServiceEvent::InputPorts(ports) => {
                println!("Input ports: {ports:?}");
                match ports.first() {
                    Some(port) => {
                        let _ = sender.send(MidiServiceInput::SelectMidiInput(port.clone()));
                    }
                    None => {
                        println!("No MIDI inputs found.");
                        let _ = sender.send(MidiServiceInput::Quit);
                    }
                }
            }
            MidiServiceEvent::InputPortSelected(port) => {
                println!("Connected to input {port:?}. Release middle C (MIDI note 60) to quit.");
            }
            MidiServiceEvent::Midi(channel, message) => {
                module.tick(module.sample_rate().sample_time());
                println!("Midi: {channel} {message:?} -> {:?}", module.outputs());
                if let MidiMessage::NoteOff { key, .. } = message {
                    if key.as_int() == 60 {
                        let _ = sender.send(MidiServiceInput::Quit);
                    }
                }
            }
            MidiServiceEvent::Quit => break,
        }
    }
    println!("exiting...");

    Ok(())
}
