// Copyright (c) 2024 Mike Tsao

use super::Rack;
use crate::{
    app_version,
    modules::{ModelKey, ModelRegistry},
    prelude::*,
    util::WritableAssetPath,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Things that can go wrong while loading or saving a [Patch].
#[derive(Debug, Error)]
pub enum PatchError {
    /// The file couldn't be read or written.
    #[error("{path}: {source}")]
    Io {
        #[allow(missing_docs)]
        path: PathBuf,
        #[allow(missing_docs)]
        source: std::io::Error,
    },
    /// The file isn't a valid patch.
    #[error("malformed patch: {0}")]
    Json(#[from] serde_json::Error),
    /// The patch names a model that isn't registered.
    #[error("patch refers to unknown model {0}")]
    UnknownModel(ModelKey),
}

/// One module in a saved [Patch].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatchModule {
    /// The module's [Uid] in the rack.
    pub id: Uid,
    /// Which kind of module this is.
    pub model: ModelKey,
    /// Whatever [PersistsData::data_to_json()] returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// The on-disk form of a [Rack].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Patch {
    /// The version of the app that wrote the patch.
    #[serde(default)]
    pub version: String,
    /// Modules in rack order.
    #[serde(default)]
    pub modules: Vec<PatchModule>,
}
impl Patch {
    /// Captures the rack's modules and their data.
    pub fn from_rack(rack: &Rack) -> Self {
        Self {
            version: app_version().to_string(),
            modules: rack
                .uids()
                .iter()
                .filter_map(|uid| rack.module(uid))
                .map(|module| PatchModule {
                    id: module.uid(),
                    model: ModelKey::from(module.key()),
                    data: module.data_to_json(),
                })
                .collect(),
        }
    }

    /// Returns the first model in the patch that `registry` doesn't know.
    pub fn check_models(&self, registry: &ModelRegistry) -> Result<(), PatchError> {
        match self
            .modules
            .iter()
            .find(|m| registry.model(&m.model).is_none())
        {
            Some(m) => Err(PatchError::UnknownModel(m.model.clone())),
            None => Ok(()),
        }
    }

    /// Instantiates every module in the patch. Modules whose model isn't
    /// registered, or whose id collides with an earlier one, are skipped with
    /// a warning, so that one bad entry doesn't lose the rest of the patch.
    pub fn into_rack(self, registry: &ModelRegistry) -> Rack {
        let mut rack = Rack::default();
        for entry in self.modules {
            let Some(mut module) = registry.new_module(&entry.model, entry.id) else {
                log::warn!("skipping module {}: unknown model {}", entry.id, entry.model);
                continue;
            };
            if let Some(data) = entry.data.as_ref() {
                module.data_from_json(data);
            }
            if let Err(e) = rack.insert_module(module, registry.new_view(&entry.model)) {
                log::warn!("skipping module {}: {e}", entry.id);
            }
        }
        rack
    }

    /// Reads a patch from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PatchError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PatchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let patch = serde_json::from_str(&json)?;
        log::info!("loaded patch from {}", path.display());
        Ok(patch)
    }

    /// Writes the patch to disk, creating parent directories as needed.
    pub fn save(&self, path: &WritableAssetPath) -> Result<(), PatchError> {
        let io_error = |source| PatchError::Io {
            path: path.as_path().to_path_buf(),
            source,
        };
        if let Some(dir) = path.as_path().parent() {
            std::fs::create_dir_all(dir).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_error)?;
        log::info!("saved patch to {path}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{BuiltInModels, MidiTriggerToCv};
    use serde_json::json;

    fn registry() -> ModelRegistry {
        BuiltInModels::register(ModelRegistry::default())
            .unwrap()
            .finalize()
    }

    #[test]
    fn rack_round_trip() {
        let registry = registry();
        let key = ModelKey::from(MidiTriggerToCv::MODEL_KEY);
        let mut rack = Rack::default();
        let a = rack.add_module(&registry, &key).unwrap();
        let b = rack.add_module(&registry, &key).unwrap();
        if let Some(module) = rack.module_mut(&b) {
            module.perform_action(&crate::modules::MidiTriggerAction::ToggleVelocity.key());
            module.data_from_json(&json!({"notes": [60, 61]}));
        }

        let patch = Patch::from_rack(&rack);
        assert_eq!(patch.version, app_version());
        assert_eq!(patch.modules.len(), 2);
        assert_eq!(patch.modules[0].id, a);
        assert_eq!(patch.modules[1].model, key);
        assert!(patch.check_models(&registry).is_ok());

        let restored = patch.clone().into_rack(&registry);
        assert_eq!(restored.uids(), &[a, b]);
        let module = restored.module(&b).unwrap();
        assert_eq!(module.learnable_notes()[0], MidiNote(60));
        assert_eq!(module.learnable_notes()[1], MidiNote(61));
        assert_eq!(module.learnable_notes()[2], MidiNote(38));
        assert_eq!(Patch::from_rack(&restored), patch);
    }

    #[test]
    fn unknown_models_are_skipped() {
        let registry = registry();
        let patch: Patch = serde_json::from_value(json!({
            "version": "0.0.0",
            "modules": [
                {"id": 3, "model": "midi-trigger-to-cv", "data": {"velocity": true}},
                {"id": 4, "model": "mystery-box"},
                {"id": 3, "model": "midi-trigger-to-cv"},
            ]
        }))
        .unwrap();
        assert!(matches!(
            patch.check_models(&registry),
            Err(PatchError::UnknownModel(key)) if key == ModelKey::from("mystery-box")
        ));

        let rack = patch.into_rack(&registry);
        assert_eq!(rack.uids(), &[Uid(3)], "unknown model and duplicate id skipped");
        let data = rack.module(&Uid(3)).and_then(|m| m.data_to_json()).unwrap();
        assert_eq!(data["velocity"], true);
    }

    #[test]
    fn missing_fields_default() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert!(patch.modules.is_empty());
        assert!(patch.into_rack(&registry()).is_empty());
    }

    #[test]
    fn load_reports_errors() {
        let missing = std::env::temp_dir().join("patchbay-no-such-dir/none.json");
        assert!(matches!(Patch::load(&missing), Err(PatchError::Io { .. })));

        let paths = crate::util::AssetPaths::new_with(
            std::env::temp_dir(),
            std::env::temp_dir().join("patchbay-patch-unit-test"),
        );
        let bad = paths.user("bad.json");
        std::fs::create_dir_all(paths.user_dir()).unwrap();
        std::fs::write(&bad, "not json").unwrap();
        assert!(matches!(Patch::load(&bad), Err(PatchError::Json(_))));

        let good = paths.user("patches/good.json");
        Patch::default().save(&good).unwrap();
        assert_eq!(Patch::load(&good).unwrap(), Patch::default());
    }
}
