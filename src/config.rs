use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::nav::DEFAULT_SCROLL_THRESHOLD;
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: u16,
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: u16,
    #[serde(default = "default_start_route")]
    pub start_route: String,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_toggle_task_status")]
    pub toggle_task_status: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_status_filter")]
    pub status_filter: String,
    #[serde(default = "default_category_filter")]
    pub category_filter: String,
    #[serde(default = "default_clear_filters")]
    pub clear_filters: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_menu")]
    pub menu: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_nav_home")]
    pub nav_home: String,
    #[serde(default = "default_nav_links")]
    pub nav_links: Vec<String>,
    #[serde(default = "default_auth_links")]
    pub auth_links: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_header_bg")]
    pub header_bg: String,
    #[serde(default = "default_accent")]
    pub accent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            scroll_threshold: default_scroll_threshold(),
            mobile_breakpoint: default_mobile_breakpoint(),
            start_route: default_start_route(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            new: default_new(),
            save: default_save(),
            delete: default_delete(),
            toggle_task_status: default_toggle_task_status(),
            search: default_search(),
            status_filter: default_status_filter(),
            category_filter: default_category_filter(),
            clear_filters: default_clear_filters(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            menu: default_menu(),
            help: default_help(),
            nav_home: default_nav_home(),
            nav_links: default_nav_links(),
            auth_links: default_auth_links(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            header_bg: default_header_bg(),
            accent: default_accent(),
        }
    }
}

impl Theme {
    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        themes.insert("light".to_string(), Theme {
            fg: "black".to_string(),
            bg: "white".to_string(),
            highlight_bg: "blue".to_string(),
            highlight_fg: "white".to_string(),
            header_bg: "gray".to_string(),
            accent: "blue".to_string(),
        });

        themes.insert("indigo".to_string(), Theme {
            fg: "white".to_string(),
            bg: "#111827".to_string(),
            highlight_bg: "#4F46E5".to_string(),
            highlight_fg: String::new(),
            header_bg: "#1F2937".to_string(),
            accent: "#818CF8".to_string(),
        });

        themes
    }
}

// Default value functions
fn default_quit() -> String {
    "q".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_toggle_task_status() -> String {
    "Space".to_string()
}

fn default_search() -> String {
    "/".to_string()
}

fn default_status_filter() -> String {
    "s".to_string()
}

fn default_category_filter() -> String {
    "c".to_string()
}

fn default_clear_filters() -> String {
    "x".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_menu() -> String {
    "m".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_nav_home() -> String {
    "0".to_string()
}

fn default_nav_links() -> Vec<String> {
    (1..=5).map(|n| n.to_string()).collect()
}

fn default_auth_links() -> Vec<String> {
    vec!["6".to_string(), "7".to_string()]
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_scroll_threshold() -> u16 {
    DEFAULT_SCROLL_THRESHOLD
}

fn default_mobile_breakpoint() -> u16 {
    100
}

fn default_start_route() -> String {
    "/tasks".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_header_bg() -> String {
    "darkgray".to_string()
}

fn default_accent() -> String {
    "lightblue".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
}

impl Config {
    /// Load configuration for the given profile, writing defaults if the file is missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from an explicit file, writing defaults if it is missing
    pub fn load_from_path(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            log::debug!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let mut config = Config::default();
            if let Err(e) = config.save_to_path(config_path) {
                log::error!("failed to save config file {}: {}", config_path.display(), e);
                return Err(e);
            }
            log::info!("wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save_to_path(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the currently active theme.
    /// An empty highlight_fg is derived from highlight_bg.
    pub fn get_active_theme(&self) -> Theme {
        use crate::tui::widgets::color::{format_color_for_display, get_contrast_text_color, parse_color};

        let mut theme = if let Some(theme) = self.themes.get(&self.current_theme) {
            theme.clone()
        } else if let Some(theme) = Theme::get_preset_themes().get(&self.current_theme) {
            theme.clone()
        } else {
            Theme::default()
        };

        if theme.highlight_fg.is_empty() {
            let calculated_fg = get_contrast_text_color(parse_color(&theme.highlight_bg));
            theme.highlight_fg = format_color_for_display(&calculated_fg);
        }

        theme
    }

    pub fn set_theme(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.themes.contains_key(name) && !Theme::get_preset_themes().contains_key(name) {
            return Err(ConfigError::ThemeNotFound(name.to_string()));
        }
        self.current_theme = name.to_string();
        Ok(())
    }
}
