use crate::ccsid;
use crate::error::{Result, ZosError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "zos_util.json";
pub const DEFAULT_APF_GROUP: &str = "APF";

/// Configuration for zos-util, stored as `zos_util.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UtilConfig {
    /// CCSID used when a tag request does not name one, and as the fallback
    /// for `set_text`/`set_mixed` on untagged or binary files
    #[serde(default = "default_ccsid")]
    pub default_ccsid: u16,

    /// Group whose members may change the APF attribute
    #[serde(default = "default_apf_group")]
    pub apf_group: String,
}

fn default_ccsid() -> u16 {
    ccsid::DEFAULT_TEXT
}

fn default_apf_group() -> String {
    DEFAULT_APF_GROUP.to_string()
}

impl Default for UtilConfig {
    fn default() -> Self {
        Self {
            default_ccsid: default_ccsid(),
            apf_group: default_apf_group(),
        }
    }
}

impl UtilConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| ZosError::from_host(&config_path, e))?;
        let config: UtilConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Load from the per-user config directory
    pub fn load_default() -> Result<Self> {
        match Self::default_dir() {
            Some(dir) => Self::load(dir),
            None => Ok(Self::default()),
        }
    }

    /// Per-user config directory, e.g. `~/.config/zos-util`
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "zos-util").map(|d| d.config_dir().to_path_buf())
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        self.validate()?;
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| ZosError::from_host(config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content).map_err(|e| ZosError::from_host(&config_path, e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !ccsid::is_text_encoding(self.default_ccsid) {
            return Err(ZosError::Config(format!(
                "default_ccsid must name a text encoding, got {}",
                self.default_ccsid
            )));
        }
        if self.apf_group.trim().is_empty() {
            return Err(ZosError::Config("apf_group cannot be empty".to_string()));
        }
        Ok(())
    }
}
