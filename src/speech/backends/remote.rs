//! Remote speech services
//!
//! The word is sent to an online text-to-speech endpoint, the MP3 it
//! returns is piped into a local command-line player. Remote services rate
//! limit and go away without notice, which is why they sit behind the
//! local engines in the default order.

use super::espeak::confirm_started;
use crate::platform::find_program;
use crate::speech::SpeechStrategy;
use crate::{Result, WordrillError};
use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// An online endpoint and how to ask it for speech
#[derive(Debug, Clone, Copy)]
pub struct RemotePreset {
    pub base_url: &'static str,
    /// Query parameter carrying the text
    pub text_param: &'static str,
    /// Query parameter carrying the language, if the service takes one
    pub lang_param: Option<&'static str>,
    /// Fixed query parameters
    pub fixed: &'static [(&'static str, &'static str)],
}

/// Known services by strategy name
pub static PRESETS: Lazy<HashMap<&'static str, RemotePreset>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        "youdao",
        RemotePreset {
            base_url: "https://dict.youdao.com/dictvoice",
            text_param: "audio",
            lang_param: None,
            // type=2 is the US pronunciation
            fixed: &[("type", "2")],
        },
    );
    m.insert(
        "google",
        RemotePreset {
            base_url: "https://translate.google.com/translate_tts",
            text_param: "q",
            lang_param: Some("tl"),
            fixed: &[("ie", "UTF-8"), ("client", "tw-ob")],
        },
    );
    m
});

/// Players that read MP3 from stdin, with the arguments to make them do so
const PLAYERS: &[(&str, &[&str], &[&str])] = &[
    ("mpg123", &["--version"], &["-q", "-"]),
    (
        "ffplay",
        &["-version"],
        &["-nodisp", "-autoexit", "-loglevel", "quiet", "-"],
    ),
    ("mpv", &["--version"], &["--no-video", "--really-quiet", "-"]),
];

/// Arguments for a player given by name or path
fn player_args(player: &str) -> Vec<String> {
    let base = std::path::Path::new(player)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(player);
    PLAYERS
        .iter()
        .find(|(name, _, _)| *name == base)
        .map(|(_, _, args)| args.iter().map(|a| a.to_string()).collect())
        .unwrap_or_else(|| vec!["-".to_string()])
}

/// Remote text-to-speech strategy
pub struct RemoteStrategy {
    name: String,
    preset: RemotePreset,
    client: Client,
    language: String,
    /// Explicit player from config; otherwise found on first use
    player: Option<String>,
    current_player: Option<Child>,
}

impl RemoteStrategy {
    /// Build a strategy for a named preset
    ///
    /// `timeout` bounds each HTTP request.
    pub fn new(
        name: &str,
        language: &str,
        player: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let preset = *PRESETS
            .get(name)
            .ok_or_else(|| WordrillError::Config(format!("Unknown remote speech service '{}'", name)))?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wordrill/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            name: name.to_string(),
            preset,
            client,
            language: language.to_string(),
            player,
            current_player: None,
        })
    }

    /// Request URL for `text`, query values percent-encoded
    pub fn request_url(&self, text: &str) -> Result<Url> {
        let primary = self
            .language
            .split(['-', '_'])
            .next()
            .unwrap_or("en")
            .to_lowercase();

        let mut params: Vec<(&str, &str)> = self.preset.fixed.to_vec();
        if let Some(lang_param) = self.preset.lang_param {
            params.push((lang_param, primary.as_str()));
        }
        params.push((self.preset.text_param, text));

        Url::parse_with_params(self.preset.base_url, &params)
            .map_err(|e| WordrillError::Config(format!("Bad speech URL: {}", e)))
    }

    async fn player(&mut self) -> Result<String> {
        if let Some(player) = &self.player {
            return Ok(player.clone());
        }
        for (name, probe, _) in PLAYERS {
            if let Some(player) = find_program(&[*name], probe).await {
                debug!("Using audio player: {}", player);
                self.player = Some(player.clone());
                return Ok(player);
            }
        }
        Err(WordrillError::Speech(
            "No audio player found (tried mpg123, ffplay, mpv)".to_string(),
        ))
    }
}

async fn fetch(client: Client, url: Url) -> Result<Vec<u8>> {
    debug!("Fetching speech from {}", url.host_str().unwrap_or("?"));
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[async_trait]
impl SpeechStrategy for RemoteStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn speak(&mut self, text: &str) -> Result<bool> {
        self.stop();
        let player = self.player().await?;
        let url = self.request_url(text)?;
        let audio = fetch(self.client.clone(), url).await?;
        if audio.is_empty() {
            debug!("'{}' returned no audio", self.name);
            return Ok(false);
        }

        let mut child = Command::new(&player)
            .args(player_args(&player))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WordrillError::Speech(format!("Failed to start {}: {}", player, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&audio).await?;
            stdin.shutdown().await?;
        }

        let started = confirm_started(&mut child).await?;
        self.current_player = Some(child);
        Ok(started)
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.current_player.take() {
            debug!("Killing audio player");
            if let Err(e) = child.start_kill() {
                debug!("Failed to kill audio player: {}", e);
            }
        }
    }

    async fn wait(&mut self) {
        if let Some(mut child) = self.current_player.take() {
            if let Err(e) = child.wait().await {
                debug!("Failed to wait for child: {}", e);
            }
        }
    }
}

impl Drop for RemoteStrategy {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(name: &str) -> RemoteStrategy {
        RemoteStrategy::new(name, "en-US", Some("mpg123".into()), Duration::from_secs(8)).unwrap()
    }

    #[test]
    fn test_unknown_preset() {
        assert!(RemoteStrategy::new("bing", "en-US", None, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_youdao_url() {
        let url = strategy("youdao").request_url("ice cream").unwrap();
        assert_eq!(
            url.as_str(),
            "https://dict.youdao.com/dictvoice?type=2&audio=ice+cream"
        );
    }

    #[test]
    fn test_google_url_uses_primary_language() {
        let url = strategy("google").request_url("café").unwrap();
        assert_eq!(
            url.as_str(),
            "https://translate.google.com/translate_tts?ie=UTF-8&client=tw-ob&tl=en&q=caf%C3%A9"
        );
    }

    #[test]
    fn test_player_args() {
        assert_eq!(player_args("/usr/bin/mpg123"), vec!["-q", "-"]);
        assert_eq!(player_args("aplay"), vec!["-"]);
    }
}
