//! Configuration management

use crate::{Result, WordrillError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SPEECH_TIMEOUT_MS: u64 = 8000;

/// Application configuration for the drill
///
/// Holds speech parameters, quiz timing and the location of the word list.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.wordrill.cfg unless overridden)
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`, writing the defaults there if absent
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| WordrillError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| WordrillError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| WordrillError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.wordrill.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".wordrill.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("enabled", "false")
            .set("language", "en-US")
            .set("timeout_ms", "8000");

        ini.with_section(Some("quiz"))
            .set("sound", "false")
            .set("advance_delay_ms", "1000");

        ini.with_section(Some("data")).set("words", "words.json");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
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

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    fn get_millis(&self, section: &str, key: &str, default: u64) -> Duration {
        let ms = self
            .get_int(section, key, default as i64)
            .try_into()
            .unwrap_or(default);
        Duration::from_millis(ms)
    }

    fn get_percent(&self, section: &str, key: &str) -> Option<u8> {
        self.get_int(section, key, -1)
            .try_into()
            .ok()
            .filter(|&v: &u8| v <= 100)
    }

    /// Is speech playback on by default?
    pub fn speech_enabled(&self) -> bool {
        self.get_bool("speech", "enabled", false)
    }

    /// Target language code handed to speech backends
    pub fn language(&self) -> String {
        self.get_string("speech", "language", "en-US")
    }

    /// Per-strategy timeout for one speech attempt; zero falls back to the default
    pub fn speech_timeout(&self) -> Duration {
        let timeout = self.get_millis("speech", "timeout_ms", DEFAULT_SPEECH_TIMEOUT_MS);
        if timeout.is_zero() {
            Duration::from_millis(DEFAULT_SPEECH_TIMEOUT_MS)
        } else {
            timeout
        }
    }

    /// Strategy names in priority order; empty means the platform default
    pub fn strategies(&self) -> Vec<String> {
        self.get_string("speech", "strategies", "")
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Speech rate (0-100)
    pub fn rate(&self) -> Option<u8> {
        self.get_percent("speech", "rate")
    }

    /// Speech volume (0-100)
    pub fn volume(&self) -> Option<u8> {
        self.get_percent("speech", "volume")
    }

    /// Explicit audio player for remote backends
    pub fn player(&self) -> Option<String> {
        self.ini
            .get_from(Some("speech"), "player")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }

    /// Are correct/incorrect sound cues on by default?
    pub fn sound_enabled(&self) -> bool {
        self.get_bool("quiz", "sound", false)
    }

    /// Delay between a correct answer and moving to the next word
    pub fn advance_delay(&self) -> Duration {
        self.get_millis("quiz", "advance_delay_ms", 1000)
    }

    /// Path of the JSON word list
    pub fn words_path(&self) -> PathBuf {
        PathBuf::from(self.get_string("data", "words", "words.json"))
    }
}
