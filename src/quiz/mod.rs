//! Quiz sessions and the terminal drill that runs them

pub mod drill;
pub mod session;

pub use drill::Drill;
pub use session::{Position, QuizSession, Stats, Verdict, DEFAULT_ADVANCE_DELAY};

use crate::words::{render_field, TextField, WordEntry, PLACEHOLDER};

/// One word presented to the learner
///
/// Immutable once built from the word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    /// The answer the learner has to type
    pub word: String,

    /// What is shown (the translation)
    pub prompt: String,

    pub part_of_speech: Option<String>,
    pub example: Option<String>,

    /// Scene, level and book classification, where present
    pub tags: Vec<String>,
}

impl QuizItem {
    /// Item with just a word and its prompt
    pub fn new(word: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            prompt: prompt.into(),
            part_of_speech: None,
            example: None,
            tags: Vec::new(),
        }
    }

    /// Does `input` match the word, ignoring case?
    pub fn matches(&self, input: &str) -> bool {
        input.trim().to_lowercase() == self.word.trim().to_lowercase()
    }
}

impl From<&WordEntry> for QuizItem {
    fn from(entry: &WordEntry) -> Self {
        let optional =
            |field: Option<&TextField>| Some(render_field(field)).filter(|s| s != PLACEHOLDER);
        Self {
            word: entry.word.clone(),
            prompt: entry.translation.clone(),
            part_of_speech: optional(entry.part_of_speech.as_ref()),
            example: optional(entry.example.as_ref()),
            tags: [&entry.scene_category, &entry.level, &entry.book_category]
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
        }
    }
}
