//! Best-effort speech with fallback across strategies
//!
//! The dispatcher tries the strategy that worked last time first, then
//! falls back to a full scan in priority order. Failures never reach the
//! caller; the only outcome is whether speech started.

use super::SpeechStrategy;
use crate::{Result, WordrillError};
use log::{debug, info, warn};
use std::time::Duration;

/// Time a single strategy gets to start speaking
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Speaks text through an ordered list of strategies
///
/// `speak` takes `&mut self`, so calls are serialized by ownership.
pub struct SpeechDispatcher {
    /// Strategies in priority order
    strategies: Vec<Box<dyn SpeechStrategy>>,

    /// Index of the strategy that last started speaking
    last_success: Option<usize>,

    /// Strategy whose playback may still be running
    playing: Option<usize>,

    timeout: Duration,
}

impl SpeechDispatcher {
    /// Create a dispatcher; at least one strategy is required
    pub fn new(strategies: Vec<Box<dyn SpeechStrategy>>, timeout: Duration) -> Result<Self> {
        if strategies.is_empty() {
            return Err(WordrillError::Config(
                "No speech strategies configured".to_string(),
            ));
        }
        info!(
            "Speech dispatcher ready with strategies [{}], timeout {:?}",
            strategies
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", "),
            timeout
        );
        Ok(Self {
            strategies,
            last_success: None,
            playing: None,
            timeout,
        })
    }

    /// Strategy names in priority order
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Index of the remembered strategy, if any
    pub fn last_successful(&self) -> Option<usize> {
        self.last_success
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Speak `text`, returning whether any strategy started playback
    ///
    /// Interrupts playback from a previous call. Never fails: every
    /// strategy error or timeout counts as that strategy not speaking.
    pub async fn speak(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        debug!("Speaking: {}", text);

        if let Some(idx) = self.last_success {
            if self.attempt(idx, text).await {
                return true;
            }
            debug!(
                "Remembered strategy '{}' failed, scanning all",
                self.strategies[idx].name()
            );
            self.last_success = None;
        }

        for idx in 0..self.strategies.len() {
            if self.attempt(idx, text).await {
                if self.last_success != Some(idx) {
                    info!("Using speech strategy '{}'", self.strategies[idx].name());
                }
                self.last_success = Some(idx);
                return true;
            }
        }

        warn!("No speech strategy could speak '{}'", text);
        false
    }

    /// Stop whatever is playing
    pub fn stop(&mut self) {
        if let Some(idx) = self.playing.take() {
            debug!("Stopping playback on '{}'", self.strategies[idx].name());
            self.strategies[idx].stop();
        }
    }

    /// Wait until the playing strategy has finished speaking
    pub async fn wait(&mut self) {
        if let Some(idx) = self.playing {
            self.strategies[idx].wait().await;
            self.playing = None;
        }
    }

    /// Run one strategy under the timeout
    async fn attempt(&mut self, idx: usize, text: &str) -> bool {
        self.stop();

        let timeout = self.timeout;
        let strategy = &mut self.strategies[idx];
        let outcome = tokio::time::timeout(timeout, strategy.speak(text)).await;

        match outcome {
            Ok(Ok(true)) => {
                debug!("Strategy '{}' started speaking", strategy.name());
                self.playing = Some(idx);
                return true;
            }
            Ok(Ok(false)) => debug!("Strategy '{}' declined", strategy.name()),
            Ok(Err(e)) => debug!("Strategy '{}' failed: {}", strategy.name(), e),
            Err(_) => debug!("Strategy '{}' timed out after {:?}", strategy.name(), timeout),
        }
        strategy.stop();
        false
    }
}

impl Drop for SpeechDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Broken;

    #[async_trait]
    impl SpeechStrategy for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        async fn speak(&mut self, _text: &str) -> Result<bool> {
            Err(WordrillError::Speech("no engine".into()))
        }

        fn stop(&mut self) {}
    }

    #[test]
    fn test_requires_strategy() {
        assert!(SpeechDispatcher::new(Vec::new(), DEFAULT_TIMEOUT).is_err());
    }

    #[tokio::test]
    async fn test_blank_text_is_not_spoken() {
        let mut dispatcher = SpeechDispatcher::new(vec![Box::new(Broken)], DEFAULT_TIMEOUT).unwrap();
        assert!(!dispatcher.speak("  ").await);
        assert!(!dispatcher.speak("word").await);
        assert_eq!(dispatcher.last_successful(), None);
    }
}
