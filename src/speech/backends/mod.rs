//! Concrete speech strategies

// Native TTS backend using the tts crate (cross-platform)
pub mod native;

// espeak-ng subprocess, with WSLg PulseAudio setup
pub mod espeak;

// Windows SAPI through PowerShell, for WSL
pub mod windows;

// Online TTS services played through a local MP3 player
pub mod remote;

pub use espeak::EspeakStrategy;
pub use native::NativeStrategy;
pub use remote::{RemoteStrategy, PRESETS};
pub use windows::SapiStrategy;
