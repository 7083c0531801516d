//! Speech strategy abstraction
//!
//! A strategy is one way of turning text into audible speech: the
//! platform engine, a local synthesizer process or a remote service.
//! Strategies fail independently; the dispatcher decides which to try.

use crate::Result;
use async_trait::async_trait;

/// One backend capable of speaking text
#[async_trait]
pub trait SpeechStrategy: Send {
    /// Short name used in config and logs
    fn name(&self) -> &str;

    /// Start speaking `text`
    ///
    /// Returns `Ok(true)` once playback has audibly started, `Ok(false)`
    /// if the backend declined, and `Err` if it failed. Playback may
    /// continue after this returns; `stop` interrupts it.
    async fn speak(&mut self, text: &str) -> Result<bool>;

    /// Interrupt any in-flight playback
    ///
    /// Must be safe to call when nothing is playing.
    fn stop(&mut self);

    /// Wait for in-flight playback to finish on its own
    async fn wait(&mut self) {}
}
