use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::PathBuf, time::Duration};

use crate::{decode::DecodeOptions, error::Error};

/// Environment variable holding the market app code.
pub const APP_CODE_ENV: &str = "MOJI_APP_CODE";

pub const DEFAULT_HOST: &str = "http://aliv1.data.moji.com";
pub const DEFAULT_TOKEN: &str = "0f9d7e535dfbfad15b8fd2a84fee3e36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Client configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// app_code = "..."
/// timeout_secs = 10
/// strict_status = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Credential sent as `Authorization: APPCODE <app_code>`.
    pub app_code: Option<String>,
    pub token: Option<String>,
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Treat a non-zero envelope status as an error.
    pub strict_status: bool,
}

impl Config {
    /// Read the config file. A missing file is an empty config.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text)
                .with_context(|| format!("Invalid config in {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Write the config file, creating its directory on first use.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        let dir = path
            .parent()
            .ok_or_else(|| anyhow!("Config path {} has no parent", path.display()))?;

        fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
        fs::write(&path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Cannot write {}", path.display()))
    }

    /// `<platform config dir>/moji-cli/config.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        ProjectDirs::from("com", "moji", "moji-cli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| anyhow!("No home directory to keep the moji config in"))
    }

    /// Overlay values from the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; a non-blank app code there wins over the file.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(code) = lookup(APP_CODE_ENV).filter(|c| !c.trim().is_empty()) {
            self.app_code = Some(code);
        }
        self
    }

    /// The credential, required before any request can be made.
    pub fn app_code(&self) -> Result<&str, Error> {
        self.app_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "{APP_CODE_ENV} environment variable is not set.\n\
                     Hint: export {APP_CODE_ENV} or run `moji configure`."
                ))
            })
    }

    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or(DEFAULT_TOKEN)
    }

    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .unwrap_or(DEFAULT_HOST)
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict_status: self.strict_status,
        }
    }

    pub fn set_app_code(&mut self, app_code: String) {
        self.app_code = Some(app_code);
    }
}
