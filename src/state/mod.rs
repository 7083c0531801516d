//! Runtime settings
//!
//! Settings start from the config file, can be overridden on the command
//! line and are toggled by the learner during a drill.

pub mod config;

use config::Config;
use log::info;

/// Toggles that control feedback during a drill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Speak each word when it is presented, and allow `:speak`
    pub speak_enabled: bool,

    /// Ring the terminal bell on correct/incorrect answers
    pub sound_enabled: bool,
}

impl Settings {
    /// Build settings from config, with command-line overrides
    pub fn from_config(config: &Config, speak: bool, sound: bool) -> Self {
        let settings = Self {
            speak_enabled: speak || config.speech_enabled(),
            sound_enabled: sound || config.sound_enabled(),
        };
        info!(
            "Settings: speech {}, sound {}",
            on_off(settings.speak_enabled),
            on_off(settings.sound_enabled)
        );
        settings
    }

    /// Flip speech on/off and return the new state
    pub fn toggle_speak(&mut self) -> bool {
        self.speak_enabled = !self.speak_enabled;
        self.speak_enabled
    }

    /// Flip sound cues on/off and return the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }
}

/// Render a flag the way the drill reports it
pub fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        assert!(settings.toggle_speak());
        assert!(!settings.toggle_speak());
        assert!(settings.toggle_sound());
        assert_eq!(on_off(settings.sound_enabled), "on");
    }
}
