//! Settings of the local device, persisted as TOML.
//!
//! Storage location:
//! - Linux: $XDG_CONFIG_HOME/lansend/config.toml or
//!   $HOME/.config/lansend/config.toml
//! - macOS: $HOME/Library/Application Support/lansend/config.toml
//! - Windows: %APPDATA%\lansend\config.toml

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    model::{DeviceMessage, DeviceType, Protocol, PROTOCOL_VERSION},
    LansendError, Result,
};

pub const DEFAULT_PORT: u16 = 53317;
const CONFIG_DIR_NAME: &str = "lansend";
const CONFIG_FILE_NAME: &str = "config.toml";

/// How this device presents itself to peers and where it stores what it
/// receives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    pub alias: String,
    pub device_model: String,
    pub device_type: DeviceType,
    pub protocol: Protocol,
    pub port: u16,
    /// Whether the download API is offered to peers.
    pub download: bool,
    pub fingerprint: String,
    pub store_path: Option<PathBuf>,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            alias: env::var("HOSTNAME")
                .ok()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| CONFIG_DIR_NAME.to_string()),
            device_model: env::consts::OS.to_string(),
            device_type: DeviceType::Desktop,
            protocol: Protocol::Http,
            port: DEFAULT_PORT,
            download: false,
            fingerprint: Uuid::new_v4().to_string(),
            store_path: None,
        }
    }
}

impl DeviceSettings {
    /// The message this device announces itself with.
    pub fn to_device_message(&self) -> DeviceMessage {
        DeviceMessage {
            alias: self.alias.clone(),
            device_model: self.device_model.clone(),
            device_type: self.device_type.to_string(),
            download: self.download,
            fingerprint: self.fingerprint.clone(),
            port: self.port,
            protocol: self.protocol.to_string(),
            version: PROTOCOL_VERSION.to_string(),
        }
    }

    /// Returns the configuration directory under the user's
    /// platform-appropriate config directory.
    pub fn config_dir() -> Result<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = env::var("APPDATA") {
                return Ok(PathBuf::from(appdata).join(CONFIG_DIR_NAME));
            }
            if let Ok(userprofile) = env::var("USERPROFILE") {
                return Ok(PathBuf::from(userprofile)
                    .join(".config")
                    .join(CONFIG_DIR_NAME));
            }
            return Err(LansendError::Config(
                "missing APPDATA/USERPROFILE".to_string(),
            ));
        }

        #[cfg(target_os = "macos")]
        {
            if let Ok(home) = env::var("HOME") {
                return Ok(PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join(CONFIG_DIR_NAME));
            }
            return Err(LansendError::Config("missing HOME".to_string()));
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let config_dir = if let Ok(xdg_config_home) =
                env::var("XDG_CONFIG_HOME")
            {
                PathBuf::from(xdg_config_home)
            } else if let Ok(home) = env::var("HOME") {
                PathBuf::from(home).join(".config")
            } else {
                return Err(LansendError::Config(
                    "missing XDG_CONFIG_HOME/HOME".to_string(),
                ));
            };
            Ok(config_dir.join(CONFIG_DIR_NAME))
        }
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Loads the settings from the default location, falling back to
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_file()?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_file()?)
    }

    /// Writes the settings to `path`, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Directory where received files go: the configured `store_path`, or
    /// `Downloads/LanSend` in the home directory.
    pub fn receive_dir(&self) -> PathBuf {
        if let Some(dir) = &self.store_path {
            return dir.clone();
        }

        let home = if cfg!(target_os = "windows") {
            env::var("USERPROFILE")
        } else {
            env::var("HOME")
        };
        match home {
            Ok(home) => PathBuf::from(home).join("Downloads").join("LanSend"),
            Err(_) => {
                env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }
}
