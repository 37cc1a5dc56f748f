use anyhow::Result;
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use editcore::DEFAULT_FILENAME;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Save target for sessions started without a file argument
    pub default_filename: String,
    /// Ring the terminal bell when a deletion has nothing to delete
    pub audible_bell: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub status_foreground: Option<String>,
    pub status_background: Option<String>,
    pub reverse_status: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_filename: String::from(DEFAULT_FILENAME),
            audible_bell: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_foreground: None,
            status_background: None,
            reverse_status: true,
        }
    }
}

impl Config {
    /// Loads the user configuration, writing defaults if none exists yet.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(config_path) => Self::load_from(&config_path),
            None => {
                log::warn!("No configuration directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::info!("Config file does not exist, creating default");
            let default_config = Self::default();
            if let Err(e) = default_config.save_to(config_path) {
                log::warn!("Failed to write default config: {}", e);
            }
            return Ok(default_config);
        }

        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(io_err) => {
                log::error!("Failed to read config file: {}", io_err);
                return Ok(Self::default());
            }
        };

        if content.trim().is_empty() {
            log::warn!("Config file is empty, using defaults");
            return Ok(Self::default());
        }

        match serde_json::from_str::<Self>(&content) {
            Ok(mut config) => {
                config.validate();
                log::info!("Loaded config from: {}", config_path.display());
                Ok(config)
            }
            Err(json_err) => {
                log::error!("Failed to parse config file: {}", json_err);

                let backup_path = config_path.with_extension("bak");
                match fs::copy(config_path, &backup_path) {
                    Ok(_) => log::info!("Backed up broken config to: {}", backup_path.display()),
                    Err(e) => log::warn!("Failed to backup broken config: {}", e),
                }

                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let mut config_to_save = self.clone();
        config_to_save.validate();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }

        let content = serde_json::to_string_pretty(&config_to_save)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
        fs::write(config_path, content).map_err(|e| {
            anyhow::anyhow!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            )
        })?;

        log::info!("Saved config to: {}", config_path.display());
        Ok(())
    }

    /// Fix invalid values in place, warning about each one.
    pub fn validate(&mut self) {
        let mut has_issues = false;

        if self.editor.default_filename.trim().is_empty() {
            log::warn!("Empty default filename, using {}", DEFAULT_FILENAME);
            self.editor.default_filename = DEFAULT_FILENAME.to_string();
            has_issues = true;
        }

        for (name, slot) in [
            ("status_foreground", &mut self.ui.status_foreground),
            ("status_background", &mut self.ui.status_background),
        ] {
            if let Some(value) = slot.as_deref() {
                if parse_color(value).is_none() {
                    log::warn!("Invalid colour for {}: {:?}, ignoring", name, value);
                    *slot = None;
                    has_issues = true;
                }
            }
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }
    }

    pub fn status_foreground(&self) -> Option<Color> {
        self.ui.status_foreground.as_deref().and_then(parse_color)
    }

    pub fn status_background(&self) -> Option<Color> {
        self.ui.status_background.as_deref().and_then(parse_color)
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("CHEUKEDIT_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("CHEUKEDIT_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "cheukedit", "cheukedit")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}

/// Accepts ratatui colour names ("red", "lightblue", ...) and `#RRGGBB`.
pub fn parse_color(value: &str) -> Option<Color> {
    Color::from_str(value.trim()).ok()
}
