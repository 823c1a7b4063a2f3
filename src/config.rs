use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    #[serde(default)]
    pub start_screen: ScreenKind,
    /// JSON fixture to load instead of the bundled photographers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            start_screen: ScreenKind::default(),
            fixture_path: None,
        }
    }
}

fn default_tick_rate() -> u64 {
    250
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKind {
    #[default]
    Home,
    Explore,
    Messages,
    Profile,
    Settings,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 5] = [
        ScreenKind::Home,
        ScreenKind::Explore,
        ScreenKind::Messages,
        ScreenKind::Profile,
        ScreenKind::Settings,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreenKind::Home => "Home",
            ScreenKind::Explore => "Explore",
            ScreenKind::Messages => "Messages",
            ScreenKind::Profile => "Profile",
            ScreenKind::Settings => "Settings",
        }
    }
}

/// Starting values for the settings screen. Changes made in the UI are not written back.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsConfig {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub private_account: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            private_account: false,
            language: default_language(),
            currency: default_currency(),
            notifications: NotificationsConfig::default(),
        }
    }
}

fn default_language() -> String {
    "English".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub messages: bool,
    #[serde(default = "default_true")]
    pub likes: bool,
    #[serde(default = "default_true")]
    pub comments: bool,
    #[serde(default = "default_true")]
    pub mentions: bool,
    #[serde(default = "default_true")]
    pub bookings: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            messages: true,
            likes: true,
            comments: true,
            mentions: true,
            bookings: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shutterfeed").join("config.toml"))
    }

    /// Reads the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(&Config::default())?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }
}
