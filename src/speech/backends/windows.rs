//! Windows TTS backend using SAPI (System.Speech.Synthesis)
//!
//! This backend is meant for WSL, where the Linux side often has no speech
//! engine but Windows SAPI is reachable through PowerShell interop. Each
//! utterance runs one PowerShell process; the text goes in on stdin so it
//! never needs quoting.

use super::espeak::confirm_started;
use crate::platform::find_program;
use crate::speech::SpeechStrategy;
use crate::{Result, WordrillError};
use async_trait::async_trait;
use log::debug;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// Windows SAPI backend for WSL
pub struct SapiStrategy {
    /// PowerShell process currently speaking
    process: Option<Child>,

    /// Path to powershell.exe, found on first use
    powershell_path: Option<String>,

    /// Rate setting (0-100)
    rate: u8,

    /// Volume setting (0-100)
    volume: u8,
}

impl SapiStrategy {
    pub fn new(rate: Option<u8>, volume: Option<u8>) -> Self {
        Self {
            process: None,
            powershell_path: None,
            rate: rate.unwrap_or(50),
            volume: volume.unwrap_or(80),
        }
    }

    /// Convert rate (0-100) to SAPI rate (-10 to 10)
    fn rate_to_sapi(rate: u8) -> i8 {
        (rate.min(100) as i16 / 5 - 10) as i8
    }

    /// Script that speaks whatever arrives on stdin
    fn script(&self) -> String {
        format!(
            "Add-Type -AssemblyName System.Speech; \
             $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
             $synth.Rate = {}; $synth.Volume = {}; \
             $synth.Speak([Console]::In.ReadToEnd())",
            Self::rate_to_sapi(self.rate),
            self.volume.min(100)
        )
    }

    async fn powershell_path(&mut self) -> Result<String> {
        if let Some(path) = &self.powershell_path {
            return Ok(path.clone());
        }
        let path = find_program(
            &[
                "powershell.exe",
                "/mnt/c/Windows/System32/WindowsPowerShell/v1.0/powershell.exe",
            ],
            &["-NoProfile", "-Command", "exit 0"],
        )
        .await
        .ok_or_else(|| {
            WordrillError::Speech("PowerShell not found. WSL interop may not be enabled.".to_string())
        })?;
        debug!("Found PowerShell at: {}", path);
        self.powershell_path = Some(path.clone());
        Ok(path)
    }
}

#[async_trait]
impl SpeechStrategy for SapiStrategy {
    fn name(&self) -> &str {
        "sapi"
    }

    async fn speak(&mut self, text: &str) -> Result<bool> {
        self.stop();
        let path = self.powershell_path().await?;

        let mut child = Command::new(path)
            .arg("-NoProfile")
            .arg("-NonInteractive")
            .arg("-Command")
            .arg(self.script())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WordrillError::Speech(format!("Failed to start PowerShell: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let started = confirm_started(&mut child).await?;
        self.process = Some(child);
        Ok(started)
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.process.take() {
            debug!("Killing PowerShell speech process");
            if let Err(e) = child.start_kill() {
                debug!("Failed to kill PowerShell: {}", e);
            }
        }
    }

    async fn wait(&mut self) {
        if let Some(mut child) = self.process.take() {
            if let Err(e) = child.wait().await {
                debug!("Failed to wait for child: {}", e);
            }
        }
    }
}

impl Drop for SapiStrategy {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversion() {
        assert_eq!(SapiStrategy::rate_to_sapi(0), -10);
        assert_eq!(SapiStrategy::rate_to_sapi(50), 0);
        assert_eq!(SapiStrategy::rate_to_sapi(100), 10);
    }

    #[test]
    fn test_script_embeds_settings() {
        let sapi = SapiStrategy::new(Some(75), Some(60));
        let script = sapi.script();
        assert!(script.contains("$synth.Rate = 5;"));
        assert!(script.contains("$synth.Volume = 60;"));
    }
}
