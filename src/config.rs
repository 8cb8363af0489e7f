//! Configuration loading.
//!
//! Defaults, overlaid by the global config file, then the root-local one,
//! then `MALLA_*` environment overrides. An explicit `--config` path (or
//! `MALLA_CONFIG`) replaces the file discovery entirely.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MallaError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a TOML catalog file. The built-in curriculum is used when
    /// unset. Relative paths resolve against the malla root.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Progress file name under the malla root.
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: "progress.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: human, json, plain.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("MALLA_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(local) = Self::load_patch(&root.join("config.toml"))? {
                config.merge_patch(local);
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("malla/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| MallaError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| MallaError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.catalog {
            if let Some(path) = patch.path {
                self.catalog.path = Some(path);
            }
        }
        if let Some(patch) = patch.storage {
            if let Some(file) = patch.file {
                self.storage.file = file;
            }
        }
        if let Some(patch) = patch.output {
            if let Some(format) = patch.format {
                self.output.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("MALLA_CATALOG") {
            self.catalog.path = Some(PathBuf::from(path));
        }
        if let Ok(file) = std::env::var("MALLA_PROGRESS_FILE") {
            self.storage.file = file;
        }
        if let Ok(format) = std::env::var("MALLA_OUTPUT_FORMAT") {
            self.output.format = format;
        }
    }

    /// Template written by `malla init`.
    #[must_use]
    pub const fn default_toml() -> &'static str {
        r#"# malla configuration

[catalog]
# path = "catalog.toml"   # omit to use the built-in curriculum

[storage]
file = "progress.json"

[output]
format = "human"           # human, json, plain
"#
    }
}

/// Partial config as it appears in a file; every field optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    storage: Option<StoragePatch>,
    output: Option<OutputPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputPatch {
    format: Option<String>,
}
