//! Native TTS backend using the tts crate
//!
//! This backend uses the `tts` crate which provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - SAPI/WinRT on Windows

use crate::speech::SpeechStrategy;
use crate::{Result, WordrillError};
use async_trait::async_trait;
use log::{debug, error, warn};
use std::time::Duration;
use tts::Tts as TtsCrate;

/// Interval for polling whether the engine is still speaking
const SPEAKING_POLL: Duration = Duration::from_millis(100);

/// Platform speech engine
///
/// The engine is opened on first use, so a machine without one simply
/// reports a failed attempt instead of refusing to start.
pub struct NativeStrategy {
    /// The tts crate's TTS instance, once opened
    tts: Option<TtsCrate>,

    /// Set after opening failed, to avoid retrying every call
    unavailable: bool,

    /// Language code used to pick a voice (e.g. "en-US")
    language: String,

    /// Rate setting (0-100)
    rate: Option<u8>,

    /// Volume setting (0-100)
    volume: Option<u8>,
}

impl NativeStrategy {
    pub fn new(language: impl Into<String>, rate: Option<u8>, volume: Option<u8>) -> Self {
        Self {
            tts: None,
            unavailable: false,
            language: language.into(),
            rate,
            volume,
        }
    }

    /// Map 0-100 onto `min..=max`, with 50 landing on `normal`
    fn scale(value: u8, min: f32, normal: f32, max: f32) -> f32 {
        let value = value.min(100) as f32;
        if value <= 50.0 {
            min + (normal - min) * (value / 50.0)
        } else {
            normal + (max - normal) * ((value - 50.0) / 50.0)
        }
    }

    /// Does a voice language tag belong to the configured language?
    ///
    /// An exact tag match wins; otherwise the primary subtag must agree.
    fn language_matches(voice_lang: &str, wanted: &str) -> bool {
        let primary = |tag: &str| tag.split(['-', '_']).next().unwrap_or("").to_lowercase();
        voice_lang.eq_ignore_ascii_case(wanted) || primary(voice_lang) == primary(wanted)
    }

    fn open(&mut self) -> Result<&mut TtsCrate> {
        if self.unavailable {
            return Err(WordrillError::Speech(
                "Native TTS unavailable".to_string(),
            ));
        }

        if self.tts.is_none() {
            debug!("Opening native TTS engine");
            let tts = TtsCrate::default().map_err(|e| {
                self.unavailable = true;
                WordrillError::Speech(format!("Failed to initialize TTS: {}", e))
            })?;
            self.tts = Some(tts);
            self.configure();
        }

        self.tts
            .as_mut()
            .ok_or_else(|| WordrillError::Speech("Native TTS not open".to_string()))
    }

    /// Whether the engine reports speech in progress; false if it can't tell
    fn is_speaking(&self) -> bool {
        self.tts.as_ref().is_some_and(|tts| {
            tts.supported_features().is_speaking && matches!(tts.is_speaking(), Ok(true))
        })
    }

    /// Apply rate, volume and voice; failures only degrade quality
    fn configure(&mut self) {
        let Some(tts) = self.tts.as_mut() else {
            return;
        };
        let features = tts.supported_features();

        if let Some(rate) = self.rate {
            if features.rate {
                let value = Self::scale(rate, tts.min_rate(), tts.normal_rate(), tts.max_rate());
                if let Err(e) = tts.set_rate(value) {
                    warn!("Failed to set rate: {}", e);
                }
            } else {
                warn!("Rate control not supported on this platform");
            }
        }

        if let Some(volume) = self.volume {
            if features.volume {
                let value = Self::scale(
                    volume,
                    tts.min_volume(),
                    tts.normal_volume(),
                    tts.max_volume(),
                );
                if let Err(e) = tts.set_volume(value) {
                    warn!("Failed to set volume: {}", e);
                }
            } else {
                warn!("Volume control not supported on this platform");
            }
        }

        if features.voice {
            match tts.voices() {
                Ok(voices) => {
                    let exact = voices
                        .iter()
                        .find(|v| v.language().as_str().eq_ignore_ascii_case(&self.language));
                    let voice = exact.or_else(|| {
                        voices
                            .iter()
                            .find(|v| Self::language_matches(v.language().as_str(), &self.language))
                    });
                    match voice {
                        Some(voice) => {
                            debug!("Selecting voice: {}", voice.name());
                            if let Err(e) = tts.set_voice(voice) {
                                warn!("Failed to set voice: {}", e);
                            }
                        }
                        None => warn!("No voice found for language {}", self.language),
                    }
                }
                Err(e) => warn!("Failed to list voices: {}", e),
            }
        }
    }
}

#[async_trait]
impl SpeechStrategy for NativeStrategy {
    fn name(&self) -> &str {
        "native"
    }

    async fn speak(&mut self, text: &str) -> Result<bool> {
        let tts = self.open()?;
        debug!("Speaking: {}", text);
        tts.speak(text, true).map_err(|e| {
            error!("Failed to speak: {}", e);
            WordrillError::Speech(format!("Speak failed: {}", e))
        })?;
        Ok(true)
    }

    fn stop(&mut self) {
        if let Some(tts) = self.tts.as_mut() {
            debug!("Canceling speech");
            if let Err(e) = tts.stop() {
                debug!("Failed to cancel speech: {}", e);
            }
        }
    }

    async fn wait(&mut self) {
        while self.is_speaking() {
            tokio::time::sleep(SPEAKING_POLL).await;
        }
    }
}
