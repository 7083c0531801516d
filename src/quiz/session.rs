//! Quiz session state machine
//!
//! A session walks an ordered list of items. Each item is presented until
//! the learner answers it correctly (and the caller advances after the
//! display delay) or moves on manually.

use super::QuizItem;
use log::debug;
use std::time::Duration;

/// Pause between a correct answer and the next word
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1000);

/// Where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Showing the item at this index
    Presenting(usize),
    /// Past the last item
    Finished,
}

/// Running tally of answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub correct: u32,
    pub incorrect: u32,
}

/// Outcome of a submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The caller should wait `advance_after` and then call `advance`
    Correct { advance_after: Duration },
    /// The correct word, now revealed; the session stays put
    Incorrect { answer: String },
}

/// A drill over one category's words
#[derive(Debug, Clone)]
pub struct QuizSession {
    items: Vec<QuizItem>,
    position: Position,
    stats: Stats,
    advance_delay: Duration,
    /// Answer revealed after a wrong submission, cleared on movement
    revealed: Option<String>,
}

impl QuizSession {
    /// Start a session at the first item; an empty list starts finished
    pub fn new(items: Vec<QuizItem>, advance_delay: Duration) -> Self {
        let position = if items.is_empty() {
            Position::Finished
        } else {
            Position::Presenting(0)
        };
        debug!("New quiz session with {} items", items.len());
        Self {
            items,
            position,
            stats: Stats::default(),
            advance_delay,
            revealed: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position == Position::Finished
    }

    /// Item being presented, if any
    pub fn current(&self) -> Option<&QuizItem> {
        match self.position {
            Position::Presenting(i) => self.items.get(i),
            Position::Finished => None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// One-based position and total, for the progress indicator
    pub fn progress(&self) -> (usize, usize) {
        let shown = match self.position {
            Position::Presenting(i) => i + 1,
            Position::Finished => self.items.len(),
        };
        (shown, self.items.len())
    }

    /// The answer revealed by the last wrong submission on this item
    pub fn revealed(&self) -> Option<&str> {
        self.revealed.as_deref()
    }

    /// Move to the next item, or finish after the last one
    pub fn advance(&mut self) -> Position {
        if let Position::Presenting(i) = self.position {
            self.position = if i + 1 < self.items.len() {
                Position::Presenting(i + 1)
            } else {
                Position::Finished
            };
            self.revealed = None;
            debug!("Advanced to {:?}", self.position);
        }
        self.position
    }

    /// Move back one item; no-op on the first item and once finished
    pub fn retreat(&mut self) -> Position {
        if let Position::Presenting(i) = self.position {
            if i > 0 {
                self.position = Position::Presenting(i - 1);
                self.revealed = None;
                debug!("Retreated to {:?}", self.position);
            }
        }
        self.position
    }

    /// Check an answer against the current item
    ///
    /// Blank input and answers after the session finished are ignored and
    /// return `None` without touching the tally.
    pub fn record_result(&mut self, input: &str) -> Option<Verdict> {
        if input.trim().is_empty() {
            return None;
        }
        let item = self.current()?;

        if item.matches(input) {
            self.stats.correct += 1;
            self.revealed = None;
            Some(Verdict::Correct {
                advance_after: self.advance_delay,
            })
        } else {
            let answer = item.word.clone();
            self.stats.incorrect += 1;
            self.revealed = Some(answer.clone());
            Some(Verdict::Incorrect { answer })
        }
    }
}
