// Copyright (c) 2024 Mike Tsao

use super::MidiTriggerToCv;
use crate::{cores::MidiTriggerCore, prelude::*, views::MidiTriggerPanel};
use anyhow::anyhow;
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

static INSTANCE: OnceCell<ModelRegistry> = OnceCell::new();

/// A globally unique identifier for a kind of module, such as a MIDI interface
/// or an oscillator. Saved patches refer to modules by this key.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModelKey(String);

/// Creates a module's logic with the given [Uid].
pub type ModuleFactoryFn = fn(Uid) -> Box<dyn Module>;
/// Creates a module's panel.
pub type ViewFactoryFn = fn() -> Box<dyn ModuleView>;

/// Everything the host needs to instantiate one kind of module.
#[derive(Clone, Debug)]
pub struct Model {
    #[allow(missing_docs)]
    pub key: ModelKey,
    /// Shown in the module browser.
    pub name: &'static str,
    #[allow(missing_docs)]
    pub logic: ModuleFactoryFn,
    #[allow(missing_docs)]
    pub view: ViewFactoryFn,
}

/// [ModelRegistry] accepts [ModelKey]s and creates modules and their views. It
/// makes sure every module has a proper [Uid].
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: FxHashMap<ModelKey, Model>,

    is_registration_complete: bool,
    sorted_keys: Vec<ModelKey>,
}
impl ModelRegistry {
    /// Registers a new kind of module. Fails if the key is taken or if the
    /// registry has been finalized.
    pub fn register_model(&mut self, model: Model) -> anyhow::Result<()> {
        if self.is_registration_complete {
            return Err(anyhow!(
                "attempt to register {} after registration completed",
                model.key
            ));
        }
        if self.models.contains_key(&model.key) {
            return Err(anyhow!("register_model({}): duplicate key", model.key));
        }
        self.models.insert(model.key.clone(), model);
        Ok(())
    }

    /// Tells the registry that we won't be registering any more models,
    /// allowing it to do some final housekeeping.
    pub fn finalize(mut self) -> Self {
        self.is_registration_complete = true;
        self.sorted_keys = self.models.keys().cloned().collect();
        self.sorted_keys.sort();
        self
    }

    #[allow(missing_docs)]
    pub fn is_finalized(&self) -> bool {
        self.is_registration_complete
    }

    #[allow(missing_docs)]
    pub fn model(&self, key: &ModelKey) -> Option<&Model> {
        self.models.get(key)
    }

    /// Creates a new module of the kind corresponding to the given [ModelKey]
    /// with the given [Uid]. Returns `None` if nothing is registered under
    /// `key`.
    pub fn new_module(&self, key: &ModelKey, uid: Uid) -> Option<Box<dyn Module>> {
        self.models.get(key).map(|model| {
            let mut module = (model.logic)(uid);
            module.set_uid(uid);
            module
        })
    }

    /// Creates a new panel for the kind of module corresponding to the given
    /// [ModelKey].
    pub fn new_view(&self, key: &ModelKey) -> Option<Box<dyn ModuleView>> {
        self.models.get(key).map(|model| (model.view)())
    }

    /// All registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &ModelKey> {
        self.models.keys()
    }

    /// Returns all the [ModelKey]s in sorted order for consistent display in
    /// the UI. Empty until [ModelRegistry::finalize()] is called.
    pub fn sorted_keys(&self) -> &[ModelKey] {
        &self.sorted_keys
    }

    /// Installs the process-wide registry. Has no effect if one is already
    /// installed.
    pub fn set_instance(instance: Self) {
        if INSTANCE.set(instance).is_err() {
            log::warn!("ModelRegistry already initialized; keeping the existing one");
        }
    }

    /// Returns the process-wide registry, creating one with the built-in
    /// models if nobody called [ModelRegistry::set_instance()].
    pub fn global() -> &'static Self {
        INSTANCE.get_or_init(|| match BuiltInModels::register(Self::default()) {
            Ok(registry) => registry.finalize(),
            Err(e) => {
                log::error!("couldn't register built-in models: {e:?}");
                Self::default().finalize()
            }
        })
    }
}

/// A collection of all modules that ship with the app. Allows the creation of
/// a [ModelRegistry] that lets the host refer to modules by [ModelKey] rather
/// than having to import and instantiate each one.
pub struct BuiltInModels {}
impl BuiltInModels {
    /// Associates each built-in module with a key. Call once at
    /// initialization.
    pub fn register(mut registry: ModelRegistry) -> anyhow::Result<ModelRegistry> {
        registry.register_model(Model {
            key: ModelKey::from(MidiTriggerToCv::MODEL_KEY),
            name: MidiTriggerToCv::MODEL_NAME,
            logic: |uid| Box::new(MidiTriggerToCv::new_with(uid, MidiTriggerCore::default())),
            view: || Box::new(MidiTriggerPanel::default()),
        })?;

        Ok(registry)
    }
}
