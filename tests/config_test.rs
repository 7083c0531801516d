//! Configuration loading tests
//!
//! Tests that the config file is created with defaults and that the
//! typed accessors read what was written

use std::time::Duration;
use wordrill::state::config::Config;
use wordrill::state::Settings;

#[test]
fn test_defaults_written_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordrill.cfg");

    let config = Config::load_from(&path).expect("Failed to load config");
    assert!(path.exists(), "Default config should be written to disk");
    assert_eq!(config.path(), path.as_path());

    assert!(!config.speech_enabled());
    assert!(!config.sound_enabled());
    assert_eq!(config.language(), "en-US");
    assert_eq!(config.speech_timeout(), Duration::from_secs(8));
    assert_eq!(config.advance_delay(), Duration::from_millis(1000));
    assert_eq!(config.words_path().to_str(), Some("words.json"));
    assert!(config.strategies().is_empty());
    assert_eq!(config.rate(), None);
    assert_eq!(config.player(), None);
}

#[test]
fn test_saved_values_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordrill.cfg");

    let mut config = Config::load_from(&path).unwrap();
    config.set("speech", "strategies", "Espeak, google ,,native");
    config.set("speech", "timeout_ms", "2500");
    config.set("quiz", "sound", "true");
    config.set("speech", "player", " mpv ");
    config.save().unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.strategies(), vec!["espeak", "google", "native"]);
    assert_eq!(config.speech_timeout(), Duration::from_millis(2500));
    assert!(config.sound_enabled());
    assert_eq!(config.player().as_deref(), Some("mpv"));
}

#[test]
fn test_bad_numbers_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordrill.cfg");
    std::fs::write(
        &path,
        "[speech]\ntimeout_ms=soon\n\n[quiz]\nadvance_delay_ms=-5\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.speech_timeout(), Duration::from_secs(8));
    assert_eq!(config.advance_delay(), Duration::from_millis(1000));
}

#[test]
fn test_zero_timeout_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::load_from(dir.path().join("wordrill.cfg")).unwrap();
    config.set("speech", "timeout_ms", "0");
    assert_eq!(config.speech_timeout(), Duration::from_secs(8));

    // A zero advance delay is valid and kept
    config.set("quiz", "advance_delay_ms", "0");
    assert_eq!(config.advance_delay(), Duration::ZERO);
}

#[test]
fn test_settings_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(dir.path().join("wordrill.cfg")).unwrap();

    let settings = Settings::from_config(&config, true, false);
    assert!(settings.speak_enabled);
    assert!(!settings.sound_enabled);
}
