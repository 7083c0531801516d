//! Integration tests for the speech dispatcher
//!
//! Scripted strategies record every call so the fallback order, the
//! remembered strategy and the stop-before-speak rule can be checked
//! without an audio device.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wordrill::speech::{build_strategies, default_strategy_names, SpeechDispatcher, SpeechStrategy};
use wordrill::state::config::Config;
use wordrill::{Result, WordrillError};

type Events = Arc<Mutex<Vec<String>>>;

#[derive(Clone, Copy)]
enum Behavior {
    Speak,
    Fail,
    Hang,
}

struct Scripted {
    name: &'static str,
    behavior: Behavior,
    /// Forces failure while set, whatever the behavior says
    broken: Arc<AtomicBool>,
    events: Events,
}

impl Scripted {
    fn boxed(name: &'static str, behavior: Behavior, events: &Events) -> Box<dyn SpeechStrategy> {
        Box::new(Self::new(name, behavior, events))
    }

    fn new(name: &'static str, behavior: Behavior, events: &Events) -> Self {
        Self {
            name,
            behavior,
            broken: Arc::new(AtomicBool::new(false)),
            events: events.clone(),
        }
    }

    fn record(&self, what: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, what));
    }
}

#[async_trait]
impl SpeechStrategy for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    async fn speak(&mut self, _text: &str) -> Result<bool> {
        self.record("speak");
        if self.broken.load(Ordering::SeqCst) {
            return Err(WordrillError::Speech("broken".into()));
        }
        match self.behavior {
            Behavior::Speak => Ok(true),
            Behavior::Fail => Err(WordrillError::Speech("no engine".into())),
            Behavior::Hang => std::future::pending().await,
        }
    }

    fn stop(&mut self) {
        self.record("stop");
    }
}

fn events() -> Events {
    Arc::new(Mutex::new(Vec::new()))
}

fn take(events: &Events) -> Vec<String> {
    std::mem::take(&mut *events.lock().unwrap())
}

fn count(events: &[String], event: &str) -> usize {
    events.iter().filter(|e| *e == event).count()
}

#[tokio::test]
async fn test_falls_back_and_remembers() {
    let log = events();
    let mut dispatcher = SpeechDispatcher::new(
        vec![
            Scripted::boxed("a", Behavior::Fail, &log),
            Scripted::boxed("b", Behavior::Speak, &log),
        ],
        Duration::from_secs(1),
    )
    .unwrap();

    assert!(dispatcher.speak("hello").await);
    assert_eq!(dispatcher.last_successful(), Some(1));
    assert_eq!(take(&log), vec!["a:speak", "a:stop", "b:speak"]);

    // The remembered strategy goes first and alone; its earlier playback is stopped
    assert!(dispatcher.speak("world").await);
    assert_eq!(take(&log), vec!["b:stop", "b:speak"]);
}

#[tokio::test]
async fn test_all_failing_returns_false() {
    let log = events();
    let mut dispatcher = SpeechDispatcher::new(
        vec![
            Scripted::boxed("a", Behavior::Fail, &log),
            Scripted::boxed("b", Behavior::Fail, &log),
        ],
        Duration::from_secs(1),
    )
    .unwrap();

    assert!(!dispatcher.speak("hello").await);
    assert_eq!(dispatcher.last_successful(), None);

    let seen = take(&log);
    assert_eq!(count(&seen, "a:speak"), 1);
    assert_eq!(count(&seen, "b:speak"), 1);
}

#[tokio::test]
async fn test_memo_cleared_when_remembered_strategy_breaks() {
    let log = events();
    let first = Scripted::new("a", Behavior::Speak, &log);
    let broken = first.broken.clone();
    let mut dispatcher = SpeechDispatcher::new(
        vec![
            Box::new(first) as Box<dyn SpeechStrategy>,
            Scripted::boxed("b", Behavior::Speak, &log),
        ],
        Duration::from_secs(1),
    )
    .unwrap();

    assert!(dispatcher.speak("one").await);
    assert_eq!(dispatcher.last_successful(), Some(0));
    take(&log);

    broken.store(true, Ordering::SeqCst);
    assert!(dispatcher.speak("two").await);
    assert_eq!(dispatcher.last_successful(), Some(1));

    let seen = take(&log);
    // Once as the remembered strategy, once again in the full scan
    assert_eq!(count(&seen, "a:speak"), 2);
    assert_eq!(seen.last().map(String::as_str), Some("b:speak"));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_strategy_times_out() {
    let log = events();
    let timeout = Duration::from_secs(8);
    let mut dispatcher = SpeechDispatcher::new(
        vec![
            Scripted::boxed("slow", Behavior::Hang, &log),
            Scripted::boxed("fast", Behavior::Speak, &log),
        ],
        timeout,
    )
    .unwrap();

    let started = tokio::time::Instant::now();
    assert!(dispatcher.speak("hello").await);
    assert!(started.elapsed() >= timeout);
    assert_eq!(dispatcher.last_successful(), Some(1));
    assert_eq!(take(&log), vec!["slow:speak", "slow:stop", "fast:speak"]);
}

#[tokio::test]
async fn test_stop_and_drop_interrupt_playback() {
    let log = events();
    let mut dispatcher = SpeechDispatcher::new(
        vec![Scripted::boxed("a", Behavior::Speak, &log)],
        Duration::from_secs(1),
    )
    .unwrap();

    assert!(dispatcher.speak("hello").await);
    dispatcher.stop();
    // Nothing left playing, so a second stop is silent
    dispatcher.stop();
    assert_eq!(take(&log), vec!["a:speak", "a:stop"]);

    assert!(dispatcher.speak("again").await);
    drop(dispatcher);
    assert_eq!(take(&log), vec!["a:speak", "a:stop"]);
}

#[tokio::test]
async fn test_blank_text_tries_nothing() {
    let log = events();
    let mut dispatcher = SpeechDispatcher::new(
        vec![Scripted::boxed("a", Behavior::Speak, &log)],
        Duration::from_secs(1),
    )
    .unwrap();

    assert!(!dispatcher.speak(" \n ").await);
    assert!(take(&log).is_empty());
}

#[test]
fn test_build_strategies_skips_unknown_names() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::load_from(dir.path().join("wordrill.cfg")).unwrap();
    config.set("speech", "strategies", "bogus, youdao, espeak");

    let names: Vec<String> = build_strategies(&config)
        .unwrap()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, vec!["youdao", "espeak"]);
}

#[test]
fn test_build_strategies_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::load_from(dir.path().join("wordrill.cfg")).unwrap();
    config.set("speech", "strategies", "bogus");

    let names: Vec<String> = build_strategies(&config)
        .unwrap()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, default_strategy_names());
}
