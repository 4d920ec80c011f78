//! Configuration management
//!
//! Startup defaults are read from `~/.voice-selector.cfg`. The file is never
//! written back: changes made in the selector last for the session only.

use crate::catalog::LanguageFilter;
use crate::input::slider::MULTIPLIER_SLIDER;
use crate::state::settings::DEFAULT_SCRIPT;
use crate::{Result, SelectorError};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name under the home directory
const CONFIG_FILE: &str = ".voice-selector.cfg";

/// Startup configuration for the voice selector
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default path, or use built-in defaults
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific file
    ///
    /// A missing file is not an error; built-in defaults apply.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.is_dir() {
            return Err(SelectorError::Config(format!(
                "{} is a directory",
                path.display()
            )));
        } else if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SelectorError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, using defaults");
            Self::default_config()
        };

        Ok(Self { ini, path })
    }

    /// Get config file path (~/.voice-selector.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE)
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("preview"))
            .set("script", DEFAULT_SCRIPT)
            .set("rate", "1.0")
            .set("pitch", "1.0")
            .set("interrupt", "true");

        ini.with_section(Some("catalog"))
            .set("poll_interval_ms", "2000");

        ini.with_section(Some("filter")).set("language", "all");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config (in memory only)
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Selector-specific configuration getters

    /// Initial preview script
    pub fn script(&self) -> String {
        self.get_string("preview", "script", DEFAULT_SCRIPT)
    }

    /// Initial rate multiplier, on the slider's grid
    pub fn rate(&self) -> f32 {
        self.get_multiplier("rate")
    }

    /// Initial pitch multiplier, on the slider's grid
    pub fn pitch(&self) -> f32 {
        self.get_multiplier("pitch")
    }

    fn get_multiplier(&self, key: &str) -> f32 {
        let value = self.get_float("preview", key, 1.0);
        if !value.is_finite() {
            warn!("Ignoring non-finite preview {} {}", key, value);
            return 1.0;
        }
        MULTIPLIER_SLIDER.snap(value)
    }

    /// Should a new preview stop the one still speaking?
    /// When false, the host queues previews behind each other
    pub fn interrupt(&self) -> bool {
        self.get_bool("preview", "interrupt", true)
    }

    /// How often the host's voice list is re-queried for changes
    pub fn poll_interval(&self) -> Duration {
        let ms = self.get_int("catalog", "poll_interval_ms", 2000).max(100);
        Duration::from_millis(ms as u64)
    }

    /// Initial language filter
    pub fn language(&self) -> LanguageFilter {
        LanguageFilter::parse(&self.get_string("filter", "language", "all"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ini: Self::default_config(),
            path: Self::config_path(),
        }
    }
}
