//! Speech playback
//!
//! Words are spoken through a [`SpeechDispatcher`] holding an ordered list
//! of [`SpeechStrategy`] backends built from the config file.

pub mod backends;
pub mod dispatcher;
pub mod strategy;

pub use dispatcher::{SpeechDispatcher, DEFAULT_TIMEOUT};
pub use strategy::SpeechStrategy;

use crate::platform::is_wsl;
use crate::state::config::Config;
use crate::Result;
use backends::{EspeakStrategy, NativeStrategy, RemoteStrategy, SapiStrategy, PRESETS};
use log::{info, warn};

/// Strategy order used when the config names nothing usable
///
/// **WSL:** espeak-ng through WSLg first, then Windows SAPI, since the
/// Linux-side native engine is rarely set up there.
///
/// **Everywhere else:** the native engine first, then espeak-ng.
///
/// Remote services always come last.
pub fn default_strategy_names() -> Vec<&'static str> {
    if is_wsl() {
        vec!["espeak", "sapi", "native", "youdao", "google"]
    } else {
        vec!["native", "espeak", "youdao", "google"]
    }
}

/// Build one strategy by name
fn build_strategy(name: &str, config: &Config) -> Result<Option<Box<dyn SpeechStrategy>>> {
    let language = config.language();
    let strategy: Box<dyn SpeechStrategy> = match name {
        "native" => Box::new(NativeStrategy::new(
            language,
            config.rate(),
            config.volume(),
        )),
        "espeak" => Box::new(EspeakStrategy::new(
            &language,
            config.rate(),
            config.volume(),
        )),
        "sapi" => Box::new(SapiStrategy::new(config.rate(), config.volume())),
        remote if PRESETS.contains_key(remote) => Box::new(RemoteStrategy::new(
            remote,
            &language,
            config.player(),
            config.speech_timeout(),
        )?),
        _ => return Ok(None),
    };
    Ok(Some(strategy))
}

/// Build strategies in the order the config names them
///
/// Unknown names are skipped with a warning. If nothing usable remains
/// the platform default order is used instead.
pub fn build_strategies(config: &Config) -> Result<Vec<Box<dyn SpeechStrategy>>> {
    let mut strategies = Vec::new();
    for name in config.strategies() {
        match build_strategy(&name, config)? {
            Some(strategy) => strategies.push(strategy),
            None => warn!("Unknown speech strategy '{}' in config, skipping", name),
        }
    }

    if strategies.is_empty() {
        info!("No usable strategies configured, using platform defaults");
        for name in default_strategy_names() {
            if let Some(strategy) = build_strategy(name, config)? {
                strategies.push(strategy);
            }
        }
    }

    Ok(strategies)
}

/// Create the dispatcher described by the config
pub fn create_dispatcher(config: &Config) -> Result<SpeechDispatcher> {
    SpeechDispatcher::new(build_strategies(config)?, config.speech_timeout())
}
