//! Local synthesizer backend using espeak-ng
//!
//! Each utterance runs as its own espeak-ng process; stopping speech kills
//! the process. On WSL with WSLg the sound reaches the host through the
//! PulseAudio server at /mnt/wslg/PulseServer, which is set up here when
//! PULSE_SERVER is not already defined.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::platform::{find_program, is_wsl};
use crate::speech::SpeechStrategy;
use crate::{Result, WordrillError};
use async_trait::async_trait;
use log::{debug, info};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};

/// How long a fresh child may take to fail before it counts as speaking
pub(crate) const STARTUP_GRACE: Duration = Duration::from_millis(150);

const WSLG_PULSE_PATH: &str = "/mnt/wslg/PulseServer";

/// espeak-ng subprocess backend
pub struct EspeakStrategy {
    /// Currently running espeak-ng process
    current_process: Option<Child>,

    /// Path to espeak-ng, found on first use
    espeak_path: Option<String>,

    /// Voice name for espeak-ng
    voice: String,

    /// Rate setting (0-100)
    rate: u8,

    /// Volume setting (0-100)
    volume: u8,
}

impl EspeakStrategy {
    pub fn new(language: &str, rate: Option<u8>, volume: Option<u8>) -> Self {
        Self {
            current_process: None,
            espeak_path: None,
            voice: Self::voice_for(language),
            rate: rate.unwrap_or(50),
            volume: volume.unwrap_or(80),
        }
    }

    /// espeak-ng voice names are lowercase language tags ("en-us")
    fn voice_for(language: &str) -> String {
        let voice = language.trim().replace('_', "-").to_lowercase();
        if voice.is_empty() {
            "en".to_string()
        } else {
            voice
        }
    }

    /// Convert rate (0-100) to espeak speed (80-450 wpm)
    fn rate_to_espeak_speed(rate: u8) -> u16 {
        80 + ((rate.min(100) as u16) * 370 / 100)
    }

    /// Convert volume (0-100) to espeak amplitude (0-200)
    fn volume_to_espeak_amplitude(volume: u8) -> u8 {
        ((volume.min(100) as u16 * 200) / 100) as u8
    }

    /// Point PulseAudio clients at WSLg when nothing else is configured
    fn setup_pulseaudio() {
        if std::env::var("PULSE_SERVER").is_ok() {
            debug!("PULSE_SERVER already set via environment");
            return;
        }
        if is_wsl() && std::path::Path::new(WSLG_PULSE_PATH).exists() {
            info!("Auto-detected WSLG PulseAudio server at {}", WSLG_PULSE_PATH);
            std::env::set_var("PULSE_SERVER", WSLG_PULSE_PATH);
        }
    }

    async fn espeak_path(&mut self) -> Result<String> {
        if let Some(path) = &self.espeak_path {
            return Ok(path.clone());
        }
        Self::setup_pulseaudio();
        let path = find_program(&["espeak-ng", "/usr/bin/espeak-ng", "espeak"], &["--version"])
            .await
            .ok_or_else(|| {
                WordrillError::Speech(
                    "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
                )
            })?;
        debug!("Found espeak-ng at: {}", path);
        self.espeak_path = Some(path.clone());
        Ok(path)
    }
}

/// Wait briefly for a new child to fail
///
/// A child still running after the grace period is treated as playing;
/// one that already exited counts only if it exited successfully.
pub(crate) async fn confirm_started(child: &mut Child) -> Result<bool> {
    match tokio::time::timeout(STARTUP_GRACE, child.wait()).await {
        Err(_) => Ok(true),
        Ok(Ok(status)) => {
            debug!("Player exited early with {}", status);
            Ok(status.success())
        }
        Ok(Err(e)) => Err(e.into()),
    }
}

#[async_trait]
impl SpeechStrategy for EspeakStrategy {
    fn name(&self) -> &str {
        "espeak"
    }

    async fn speak(&mut self, text: &str) -> Result<bool> {
        self.stop();
        let path = self.espeak_path().await?;

        let mut cmd = Command::new(path);
        cmd.arg("-v").arg(&self.voice);
        cmd.arg("-s")
            .arg(Self::rate_to_espeak_speed(self.rate).to_string());
        cmd.arg("-a")
            .arg(Self::volume_to_espeak_amplitude(self.volume).to_string());
        cmd.arg("--").arg(text);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| WordrillError::Speech(format!("Failed to start espeak-ng: {}", e)))?;
        debug!("espeak-ng process started");

        let started = confirm_started(&mut child).await?;
        self.current_process = Some(child);
        Ok(started)
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.current_process.take() {
            debug!("Killing espeak-ng process");
            if let Err(e) = child.start_kill() {
                debug!("Failed to kill espeak-ng process: {}", e);
            }
        }
    }

    async fn wait(&mut self) {
        if let Some(mut child) = self.current_process.take() {
            if let Err(e) = child.wait().await {
                debug!("Failed to wait for child: {}", e);
            }
        }
    }
}

impl Drop for EspeakStrategy {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversion() {
        assert_eq!(EspeakStrategy::rate_to_espeak_speed(0), 80);
        assert_eq!(EspeakStrategy::rate_to_espeak_speed(50), 265);
        assert_eq!(EspeakStrategy::rate_to_espeak_speed(100), 450);
        assert_eq!(EspeakStrategy::rate_to_espeak_speed(255), 450);
    }

    #[test]
    fn test_volume_conversion() {
        assert_eq!(EspeakStrategy::volume_to_espeak_amplitude(0), 0);
        assert_eq!(EspeakStrategy::volume_to_espeak_amplitude(50), 100);
        assert_eq!(EspeakStrategy::volume_to_espeak_amplitude(100), 200);
    }

    #[test]
    fn test_voice_for_language() {
        assert_eq!(EspeakStrategy::voice_for("en-US"), "en-us");
        assert_eq!(EspeakStrategy::voice_for("en_GB"), "en-gb");
        assert_eq!(EspeakStrategy::voice_for(""), "en");
    }

    #[tokio::test]
    async fn test_confirm_started_failing_child() {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg("exit 3")
            .spawn()
            .expect("sh available");
        assert!(!confirm_started(&mut child).await.unwrap());
    }
}
