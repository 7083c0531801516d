//! Helpers shared by the integration tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wordrill::speech::{SpeechDispatcher, SpeechStrategy};
use wordrill::{Result, WordrillError};

/// Strategy that records every text it is asked to speak
pub struct Recorder {
    works: bool,
    heard: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SpeechStrategy for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn speak(&mut self, text: &str) -> Result<bool> {
        self.heard.lock().unwrap().push(text.to_string());
        if self.works {
            Ok(true)
        } else {
            Err(WordrillError::Speech("muted".into()))
        }
    }

    fn stop(&mut self) {}
}

/// A dispatcher over one recorder, and the list of texts it was handed
///
/// With `works == false` every attempt fails.
pub fn recording_dispatcher(works: bool) -> (SpeechDispatcher, Arc<Mutex<Vec<String>>>) {
    let heard = Arc::new(Mutex::new(Vec::new()));
    let recorder = Recorder {
        works,
        heard: heard.clone(),
    };
    let dispatcher =
        SpeechDispatcher::new(vec![Box::new(recorder)], Duration::from_secs(1)).unwrap();
    (dispatcher, heard)
}

pub fn heard(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}
