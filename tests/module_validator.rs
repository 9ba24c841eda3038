// Copyright (c) 2024 Mike Tsao

use patchbay::{modules::ModelKey, prelude::*};

#[test]
fn module_validator_production_modules() {
    let registry = BuiltInModels::register(ModelRegistry::default())
        .unwrap()
        .finalize();
    assert!(!registry.sorted_keys().is_empty());
    validate_registry_modules(&registry);
}

fn validate_registry_modules(registry: &ModelRegistry) {
    for (uid, key) in registry.sorted_keys().iter().enumerate() {
        let uid = Uid(1000 + uid);
        if let Some(mut module) = registry.new_module(key, uid) {
            assert_eq!(module.uid(), uid, "Module {key} should keep the uid it was made with");
            assert_eq!(module.key(), key.to_string());
            validate_configurable(key, module.as_mut());
            validate_persistence(key, module.as_mut());
            validate_actions(key, module.as_mut());
            assert!(
                registry.new_view(key).is_some(),
                "Module {key} should come with a panel"
            );
        } else {
            panic!("Couldn't create module with {key}, but ModelRegistry said it existed!");
        }
    }
}

fn validate_configurable(key: &ModelKey, module: &mut dyn Module) {
    const TEST_SAMPLE_RATE: SampleRate = SampleRate(1111111);
    assert!(
        module.sample_rate().0 > 0,
        "Module {key}'s default sample rate should be nonzero"
    );
    module.update_sample_rate(TEST_SAMPLE_RATE);
    assert_eq!(
        module.sample_rate(),
        TEST_SAMPLE_RATE,
        "Module {key}'s sample rate should change once set"
    );

    for _ in 0..100 {
        module.tick(TEST_SAMPLE_RATE.sample_time());
    }
    assert!(
        module.outputs().iter().all(|v| *v == Voltage::ZERO),
        "Module {key} should be silent without input"
    );

    module.reset();
    assert_eq!(module.learning_slot(), None);
}

fn validate_persistence(key: &ModelKey, module: &mut dyn Module) {
    let before = module.data_to_json();
    module.data_from_json(&serde_json::json!({"unrelated": [1, 2, 3]}));
    assert_eq!(
        module.data_to_json(),
        before,
        "Module {key} should ignore fields it doesn't know"
    );
}

fn validate_actions(key: &ModelKey, module: &mut dyn Module) {
    let menu = ContextMenu::new_for(module);
    assert!(
        matches!(menu.rows().first(), Some(MenuRow::Item { text, .. }) if text == module.name()),
        "Module {key}'s menu should start with its name"
    );
    for action in module.actions() {
        assert!(
            module.perform_action(&action.key),
            "Module {key} should accept its own action {}",
            action.key
        );
    }
    assert!(!module.perform_action(&ActionKey::from("no-such-action")));
}
