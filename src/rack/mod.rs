// Copyright (c) 2024 Mike Tsao

//! A [Rack] owns a set of modules and their panels and steps them in time.

use crate::{
    modules::{ModelKey, ModelRegistry},
    prelude::*,
};
use anyhow::anyhow;
use rustc_hash::FxHashMap;

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Patch, PatchError, Rack};
}

pub use patch::{Patch, PatchError, PatchModule};

mod patch;

/// Owns modules, in the order they were added, along with their panels.
#[derive(Debug, Default)]
pub struct Rack {
    uid_factory: UidFactory,
    sample_rate: SampleRate,
    order: Vec<Uid>,
    modules: FxHashMap<Uid, Box<dyn Module>>,
    views: FxHashMap<Uid, Box<dyn ModuleView>>,
}
impl Rack {
    /// Instantiates the model named by `key`, gives it a fresh [Uid], and adds
    /// it along with its panel.
    pub fn add_module(&mut self, registry: &ModelRegistry, key: &ModelKey) -> anyhow::Result<Uid> {
        let uid = self.uid_factory.mint_next();
        let module = registry
            .new_module(key, uid)
            .ok_or_else(|| anyhow!("no model is registered as {key}"))?;
        self.insert_module(module, registry.new_view(key))
    }

    /// Adds an already-built module, keeping its [Uid]. Fails if the [Uid] is
    /// zero or already taken.
    pub fn insert_module(
        &mut self,
        mut module: Box<dyn Module>,
        view: Option<Box<dyn ModuleView>>,
    ) -> anyhow::Result<Uid> {
        let uid = module.uid();
        if uid.0 == 0 {
            return Err(anyhow!("Module Uid zero is invalid"));
        }
        if self.modules.contains_key(&uid) {
            return Err(anyhow!("Module Uid {uid} already exists"));
        }
        self.uid_factory.notify_externally_minted_uid(uid);
        module.update_sample_rate(self.sample_rate);
        self.order.push(uid);
        self.modules.insert(uid, module);
        if let Some(view) = view {
            self.views.insert(uid, view);
        }
        Ok(uid)
    }

    /// Removes the module and its panel, returning ownership of the module to
    /// the caller.
    pub fn remove_module(&mut self, uid: &Uid) -> Option<Box<dyn Module>> {
        self.order.retain(|u| u != uid);
        self.views.remove(uid);
        self.modules.remove(uid)
    }

    #[allow(missing_docs)]
    pub fn module(&self, uid: &Uid) -> Option<&dyn Module> {
        self.modules.get(uid).map(|m| m.as_ref())
    }

    #[allow(missing_docs)]
    pub fn module_mut(&mut self, uid: &Uid) -> Option<&mut dyn Module> {
        match self.modules.get_mut(uid) {
            Some(module) => Some(module.as_mut()),
            None => None,
        }
    }

    /// Returns a module's panel together with the module, which is what
    /// panels need in order to handle user gestures.
    pub fn view_and_module_mut(
        &mut self,
        uid: &Uid,
    ) -> Option<(&mut dyn ModuleView, &mut dyn Module)> {
        match (self.views.get_mut(uid), self.modules.get_mut(uid)) {
            (Some(view), Some(module)) => Some((view.as_mut(), module.as_mut())),
            _ => None,
        }
    }

    /// All module [Uid]s, in the order they were added.
    pub fn uids(&self) -> &[Uid] {
        &self.order
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Advances every module by one sample.
    pub fn tick(&mut self) {
        let sample_time = self.sample_rate.sample_time();
        for uid in self.order.iter() {
            if let Some(module) = self.modules.get_mut(uid) {
                module.tick(sample_time);
            }
        }
    }

    /// Lets every panel refresh itself from its module. Call once per frame.
    pub fn step_views(&mut self) {
        for uid in self.order.iter() {
            if let (Some(view), Some(module)) = (self.views.get_mut(uid), self.modules.get_mut(uid))
            {
                view.step(module.as_mut());
            }
        }
    }

    #[allow(missing_docs)]
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// Changes the sample rate of the rack and everything in it.
    pub fn update_sample_rate(&mut self, sample_rate: SampleRate) {
        self.sample_rate = sample_rate;
        self.modules
            .values_mut()
            .for_each(|m| m.update_sample_rate(sample_rate));
    }

    /// Returns the module to its just-created state. Returns false if there's
    /// no such module.
    pub fn reset_module(&mut self, uid: &Uid) -> bool {
        if let Some(module) = self.modules.get_mut(uid) {
            module.reset();
            true
        } else {
            false
        }
    }
}
