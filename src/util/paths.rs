// Copyright (c) 2024 Mike Tsao

//! Locates files that the app reads and writes.
//!
//! There are three roots. The system root holds resources that ship with the
//! app, such as panel artwork. The user root holds everything the user creates:
//! settings, patches, autosaves. Each plugin also has its own install root.
//! The system and plugin roots are read-only, and that is enforced by type:
//! they produce [ReadOnlyAssetPath]s, and anything that writes to disk accepts
//! only a [WritableAssetPath].
//!
//! Nothing in this module touches the filesystem.

use app_dirs2::{get_app_root, AppDataType, AppInfo};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

static INSTANCE: OnceCell<AssetPaths> = OnceCell::new();

const APP_INFO: AppInfo = AppInfo {
    name: "patchbay",
    author: "patchbay",
};

/// A path beneath a read-only root. Open it for reading only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOnlyAssetPath(PathBuf);
impl ReadOnlyAssetPath {
    #[allow(missing_docs)]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}
impl AsRef<Path> for ReadOnlyAssetPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
impl std::fmt::Display for ReadOnlyAssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A path beneath the user root. Safe to create, overwrite, or delete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WritableAssetPath(PathBuf);
impl WritableAssetPath {
    #[allow(missing_docs)]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}
impl AsRef<Path> for WritableAssetPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
impl std::fmt::Display for WritableAssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Describes an installed plugin: the bundle of models it provides and where
/// its files live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginInfo {
    /// A short identifier that is unique among plugins, such as "Core".
    pub slug: String,
    /// The plugin's install root.
    pub path: PathBuf,
}
impl PluginInfo {
    #[allow(missing_docs)]
    pub fn new_with(slug: &str, path: PathBuf) -> Self {
        Self {
            slug: slug.to_string(),
            path,
        }
    }
}

/// Resolves filenames against the system, user, and plugin roots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    system_dir: PathBuf,
    user_dir: PathBuf,
}
impl Default for AssetPaths {
    fn default() -> Self {
        let system_dir = std::env::var_os("PATCHBAY_SYSTEM_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let user_dir = std::env::var_os("PATCHBAY_USER_DIR")
            .map(PathBuf::from)
            .or_else(|| get_app_root(AppDataType::UserData, &APP_INFO).ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new_with(system_dir, user_dir)
    }
}
impl AssetPaths {
    /// Creates an [AssetPaths] with explicit roots.
    pub fn new_with(system_dir: PathBuf, user_dir: PathBuf) -> Self {
        Self {
            system_dir,
            user_dir,
        }
    }

    /// Returns the path of a system resource. Read only.
    pub fn system<P: AsRef<Path>>(&self, filename: P) -> ReadOnlyAssetPath {
        ReadOnlyAssetPath(Self::join_beneath(&self.system_dir, filename.as_ref()))
    }

    /// Returns the path of a user resource. Can be read and written.
    pub fn user<P: AsRef<Path>>(&self, filename: P) -> WritableAssetPath {
        WritableAssetPath(Self::join_beneath(&self.user_dir, filename.as_ref()))
    }

    /// Returns the path of a resource in the plugin's install root. Read only.
    pub fn plugin<P: AsRef<Path>>(&self, plugin: &PluginInfo, filename: P) -> ReadOnlyAssetPath {
        ReadOnlyAssetPath(Self::join_beneath(&plugin.path, filename.as_ref()))
    }

    #[allow(missing_docs)]
    pub fn system_dir(&self) -> &Path {
        &self.system_dir
    }

    #[allow(missing_docs)]
    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    /// Appends `filename` to `root`, keeping only its normal components. Root,
    /// drive prefix, `.` and `..` are all dropped, so the result is always
    /// beneath `root`.
    fn join_beneath(root: &Path, filename: &Path) -> PathBuf {
        filename
            .components()
            .fold(root.to_path_buf(), |mut path, component| {
                if let Component::Normal(part) = component {
                    path.push(part);
                }
                path
            })
    }

    /// Installs the process-wide instance. Has no effect if one is already
    /// installed.
    pub fn set_instance(instance: Self) {
        if INSTANCE.set(instance).is_err() {
            log::warn!("AssetPaths already initialized; keeping the existing roots");
        }
    }

    /// Returns the process-wide instance, creating a default one if nobody
    /// called [AssetPaths::set_instance()].
    pub fn global() -> &'static Self {
        INSTANCE.get_or_init(Self::default)
    }
}
