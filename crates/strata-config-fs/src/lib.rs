// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! On-disk settings for Strata tools.
//!
//! Each key is one pretty-printed JSON file, `<dir>/<key>.json`. The default
//! directory is the platform config dir for `dev.flyingrobots.Strata`
//! (`~/.config/strata` on Linux). Saves go through a sibling `.tmp` file and a
//! rename, so a crashed run never leaves a half-written `sim.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use strata_app_core::config::{ConfigError, ConfigStore};

/// Directory of `<key>.json` files.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    dir: PathBuf,
}

impl FsConfigStore {
    /// Store in the platform config directory, created on first use.
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "Strata").ok_or_else(|| ConfigError::Dir {
            path: PathBuf::new(),
            reason: "no home directory to derive it from".to_owned(),
        })?;
        Self::at(proj.config_dir())
    }

    /// Store in `dir` (the CLI's `--config-dir`), created if missing.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|err| ConfigError::Dir { path: dir.clone(), reason: err.to_string() })?;
        Ok(Self { dir })
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.file_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(ConfigError::NotFound(key.to_owned())),
            Err(err) => Err(ConfigError::io(key, err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let target = self.file_for(key);
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, data).map_err(|err| ConfigError::io(key, err))?;
        fs::rename(&staging, &target).map_err(|err| ConfigError::io(key, err))
    }
}
