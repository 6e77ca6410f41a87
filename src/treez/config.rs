use crate::error::{Result, TreezError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Client-side root registry, stored as `config.json` in the config dir.
///
/// The engine itself never resolves symbolic names: every operation takes an
/// explicit root. This table is how the CLI turns `--store work` into the
/// absolute path the engine wants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TreezConfig {
    /// Named roots: key → absolute directory.
    #[serde(default)]
    pub roots: BTreeMap<String, PathBuf>,

    /// Key used when no `--root`/`--store` is given.
    #[serde(default)]
    pub default_root: Option<String>,
}

impl TreezConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TreezError::Io)?;
        let config: TreezConfig =
            serde_json::from_str(&content).map_err(TreezError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TreezError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TreezError::Serialization)?;
        fs::write(config_path, content).map_err(TreezError::Io)?;
        Ok(())
    }

    /// Resolves a symbolic root key to its configured path.
    pub fn resolve(&self, key: &str) -> Result<&PathBuf> {
        self.roots
            .get(key)
            .ok_or_else(|| TreezError::NotFound(format!("no root named {:?} in config", key)))
    }

    /// Resolves the default root, if one is configured.
    pub fn resolve_default(&self) -> Result<&PathBuf> {
        match &self.default_root {
            Some(key) => self.resolve(key),
            None => Err(TreezError::BadRequest(
                "no root given and no default_root configured".to_string(),
            )),
        }
    }

    pub fn set_root(&mut self, key: impl Into<String>, path: PathBuf) {
        self.roots.insert(key.into(), path);
    }

    /// Removes a named root; clears the default if it pointed there.
    pub fn remove_root(&mut self, key: &str) -> bool {
        let removed = self.roots.remove(key).is_some();
        if removed && self.default_root.as_deref() == Some(key) {
            self.default_root = None;
        }
        removed
    }
}
