// Copyright (c) 2024 Mike Tsao

use patchbay::{modules::ModelKey, prelude::*, util::AssetPaths};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn test_paths(name: &str) -> AssetPaths {
    AssetPaths::new_with(
        std::env::temp_dir(),
        std::env::temp_dir().join(format!("patchbay-it-{name}")),
    )
}

// Teaches a slot a new note through the rack, saves the rack, and makes sure
// the reloaded rack still responds to that note on that jack.
#[test]
fn learned_notes_survive_save_and_load() {
    init_logger();
    let registry = BuiltInModels::register(ModelRegistry::default())
        .unwrap()
        .finalize();
    let key = ModelKey::from(MidiTriggerToCv::MODEL_KEY);

    let mut rack = Rack::default();
    let uid = rack.add_module(&registry, &key).unwrap();
    let sender = rack
        .module(&uid)
        .and_then(|m| m.midi_input_sender())
        .unwrap();

    rack.module_mut(&uid).unwrap().begin_learning(3);
    rack.step_views();
    let _ = sender.send(MidiInputMessage::new_note_on(MidiChannel(0), 70, 100));
    rack.tick();
    {
        let module = rack.module(&uid).unwrap();
        assert_eq!(module.learning_slot(), None);
        assert_eq!(module.learnable_notes()[3], MidiNote(70));
        assert_eq!(
            module.outputs()[3],
            Voltage::ZERO,
            "the note that was learned shouldn't also fire"
        );
    }

    let paths = test_paths("learned");
    let path = paths.user("patches/learned.json");
    Patch::from_rack(&rack).save(&path).unwrap();

    let patch = Patch::load(&path).unwrap();
    assert!(patch.check_models(&registry).is_ok());
    let mut restored = patch.into_rack(&registry);
    assert_eq!(restored.uids(), &[uid]);

    let sender = restored
        .module(&uid)
        .and_then(|m| m.midi_input_sender())
        .unwrap();
    let _ = sender.send(MidiInputMessage::new_note_on(MidiChannel(0), 70, 100));
    restored.tick();
    let module = restored.module(&uid).unwrap();
    assert_eq!(module.outputs()[3], Voltage::GATE_HIGH);
    assert!(module
        .outputs()
        .iter()
        .enumerate()
        .all(|(i, v)| i == 3 || *v == Voltage::ZERO));
}

#[test]
fn velocity_mode_survives_save_and_load() {
    init_logger();
    let registry = BuiltInModels::register(ModelRegistry::default())
        .unwrap()
        .finalize();
    let key = ModelKey::from(MidiTriggerToCv::MODEL_KEY);

    let mut rack = Rack::default();
    let uid = rack.add_module(&registry, &key).unwrap();
    {
        let module = rack.module_mut(&uid).unwrap();
        let menu = ContextMenu::new_for(module);
        let index = menu
            .rows()
            .iter()
            .position(|row| matches!(row, MenuRow::Item { action: Some(_), .. }))
            .unwrap();
        assert!(menu.activate(index, module));
    }

    let path = test_paths("velocity").user("velocity.json");
    Patch::from_rack(&rack).save(&path).unwrap();
    let mut restored = Patch::load(&path).unwrap().into_rack(&registry);

    let module = restored.module_mut(&uid).unwrap();
    module.handle_midi_message(&MidiInputMessage::new_note_on(MidiChannel(0), 36, 64));
    module.tick(SampleRate::DEFAULT.sample_time());
    let level = module.outputs()[0].0;
    assert!(
        (level - 64.0 / 127.0 * 10.0).abs() < 0.001,
        "restored module should still scale by velocity, got {level}V"
    );

    module.handle_midi_message(&MidiInputMessage::new_note_on(MidiChannel(0), 37, 0));
    module.tick(SampleRate::DEFAULT.sample_time());
    assert_eq!(
        module.outputs()[1],
        Voltage::ZERO,
        "zero velocity is a note-off"
    );
}
