// Copyright (c) 2024 Mike Tsao

//! Builds a rack without any UI, plays a short drum pattern into a
//! MIDI-Trigger-to-CV module, prints the trigger outputs, and saves the patch
//! beneath the user directory.

use patchbay::{modules::ModelKey, prelude::*};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let registry = ModelRegistry::global();
    let paths = AssetPaths::global();
    let mut settings = Settings::load_or_default(Settings::path(paths));

    let mut rack = Rack::default();
    rack.update_sample_rate(settings.audio_settings.sample_rate());
    let uid = rack.add_module(registry, &ModelKey::from(MidiTriggerToCv::MODEL_KEY))?;
    let sender = rack
        .module(&uid)
        .and_then(|m| m.midi_input_sender())
        .ok_or_else(|| anyhow::anyhow!("module {uid} has no MIDI input"))?;

    // Kick, snare, kick, closed hat on the default mapping.
    for note in [36, 38, 36, 42] {
        let _ = sender.send(MidiInputMessage::new_note_on(MidiChannel(0), note, 100));
        rack.tick();
        let _ = sender.send(MidiInputMessage::new_note_off(MidiChannel(0), note, 0));
        if let Some(module) = rack.module(&uid) {
            let high: Vec<usize> = module
                .outputs()
                .iter()
                .enumerate()
                .filter(|(_, v)| **v == Voltage::GATE_HIGH)
                .map(|(i, _)| i)
                .collect();
            println!("note {note}: triggers on jacks {high:?}");
        }
        for _ in 0..rack.sample_rate().0 / 100 {
            rack.tick();
        }
    }

    let path = paths.user("patches/headless-rack.json");
    Patch::from_rack(&rack).save(&path)?;
    println!("saved {path}");
    settings.save(&Settings::path(paths))?;

    Ok(())
}
