//! Word list loading and categorisation
//!
//! The word list is a JSON array of records. Each record carries a `word`
//! (the answer), a `translation` (the prompt), optional classification
//! fields and optional enrichment fields shown on the showcase cards.

pub mod category;
pub mod showcase;

pub use category::{Category, CategoryKind};
pub use showcase::{read_showcase, render_showcase, ShowcaseCard};

use crate::quiz::QuizItem;
use crate::{Result, WordrillError};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

/// Separator used when an enrichment field holds a list
pub const LIST_SEPARATOR: &str = "，";

/// Rendered in place of a missing enrichment field
pub const PLACEHOLDER: &str = "-";

/// A text field that may be a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    One(String),
    Many(Vec<String>),
}

impl TextField {
    /// Join list values with the full-width comma
    pub fn joined(&self) -> String {
        match self {
            TextField::One(s) => s.trim().to_string(),
            TextField::Many(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
        }
    }

    fn is_blank(&self) -> bool {
        self.joined().is_empty()
    }
}

/// Classification values are usually strings but some lists use numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Tag {
    Text(String),
    Number(serde_json::Number),
}

impl Tag {
    fn into_value(self) -> Option<String> {
        let value = match self {
            Tag::Text(s) => s.trim().to_string(),
            Tag::Number(n) => n.to_string(),
        };
        (!value.is_empty()).then_some(value)
    }
}

/// Record as it appears on disk, every alias kept separately
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default)]
    word: String,
    #[serde(default)]
    translation: String,
    scene_category: Option<Tag>,
    level: Option<Tag>,
    book_category: Option<Tag>,
    collocation: Option<TextField>,
    collocations: Option<TextField>,
    phrase: Option<TextField>,
    phrases: Option<TextField>,
    collocation_meaning: Option<TextField>,
    collocations_meaning: Option<TextField>,
    phrase_meaning: Option<TextField>,
    phrases_meaning: Option<TextField>,
    example: Option<TextField>,
    examples: Option<TextField>,
    example_meaning: Option<TextField>,
    examples_meaning: Option<TextField>,
    pos: Option<TextField>,
    part_of_speech: Option<TextField>,
}

/// First alias that holds a non-blank value
fn first_present(candidates: [Option<TextField>; 4]) -> Option<TextField> {
    candidates.into_iter().flatten().find(|f| !f.is_blank())
}

/// One record of the word list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEntry")]
pub struct WordEntry {
    pub word: String,
    pub translation: String,
    pub scene_category: Option<String>,
    pub level: Option<String>,
    pub book_category: Option<String>,
    pub collocation: Option<TextField>,
    pub collocation_meaning: Option<TextField>,
    pub example: Option<TextField>,
    pub example_meaning: Option<TextField>,
    pub part_of_speech: Option<TextField>,
}

impl From<RawEntry> for WordEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            word: raw.word.trim().to_string(),
            translation: raw.translation.trim().to_string(),
            scene_category: raw.scene_category.and_then(Tag::into_value),
            level: raw.level.and_then(Tag::into_value),
            book_category: raw.book_category.and_then(Tag::into_value),
            collocation: first_present([
                raw.collocation,
                raw.collocations,
                raw.phrase,
                raw.phrases,
            ]),
            collocation_meaning: first_present([
                raw.collocation_meaning,
                raw.collocations_meaning,
                raw.phrase_meaning,
                raw.phrases_meaning,
            ]),
            example: first_present([raw.example, raw.examples, None, None]),
            example_meaning: first_present([raw.example_meaning, raw.examples_meaning, None, None]),
            part_of_speech: first_present([raw.pos, raw.part_of_speech, None, None]),
        }
    }
}

impl WordEntry {
    /// Classification value for one category kind
    pub fn category_value(&self, kind: CategoryKind) -> Option<&str> {
        match kind {
            CategoryKind::Scene => self.scene_category.as_deref(),
            CategoryKind::Level => self.level.as_deref(),
            CategoryKind::Book => self.book_category.as_deref(),
        }
    }
}

/// Render an optional enrichment field, falling back to the placeholder
pub fn render_field(field: Option<&TextField>) -> String {
    field
        .map(TextField::joined)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// The loaded word collection
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    entries: Vec<WordEntry>,
}

impl WordBank {
    /// Load the word list from a JSON file
    ///
    /// Any read or parse failure is reported as a data-load error naming the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading word list from {:?}", path);

        let data_error = |reason: String| WordrillError::DataLoad {
            path: path.display().to_string(),
            reason,
        };

        let text = std::fs::read_to_string(path).map_err(|e| data_error(e.to_string()))?;
        let bank = Self::from_json_str(&text).map_err(|e| data_error(e.to_string()))?;

        info!("Loaded {} words from {:?}", bank.len(), path);
        Ok(bank)
    }

    /// Parse a word list from JSON text
    ///
    /// Records missing a word or a translation are dropped.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let entries: Vec<WordEntry> = serde_json::from_str(text)?;
        let before = entries.len();
        let entries: Vec<WordEntry> = entries
            .into_iter()
            .filter(|e| !e.word.is_empty() && !e.translation.is_empty())
            .collect();
        if entries.len() < before {
            debug!(
                "Skipped {} records without a word or translation",
                before - entries.len()
            );
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct categories of one kind with their word counts, in first-seen order
    pub fn categories(&self, kind: CategoryKind) -> Vec<(Category, usize)> {
        let mut groups: Vec<(Category, usize)> = Vec::new();
        for entry in &self.entries {
            let category = Category::of(entry, kind);
            match groups.iter_mut().find(|(c, _)| *c == category) {
                Some((_, count)) => *count += 1,
                None => groups.push((category, 1)),
            }
        }
        groups
    }

    /// Words that belong to `category`
    pub fn filter(&self, category: &Category) -> Vec<&WordEntry> {
        self.entries
            .iter()
            .filter(|e| category.contains(e))
            .collect()
    }

    /// Quiz items for `category`, in list order
    pub fn quiz_items(&self, category: &Category) -> Vec<QuizItem> {
        self.filter(category)
            .into_iter()
            .map(QuizItem::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_joined() {
        let many = TextField::Many(vec!["a lot".into(), " ".into(), "lots of".into()]);
        assert_eq!(many.joined(), "a lot，lots of");
        assert_eq!(TextField::One(" x ".into()).joined(), "x");
    }

    #[test]
    fn test_render_placeholder() {
        assert_eq!(render_field(None), "-");
        assert_eq!(render_field(Some(&TextField::Many(vec![]))), "-");
    }

    #[test]
    fn test_alias_precedence() {
        let bank = WordBank::from_json_str(
            r#"[{"word":"run","translation":"跑","collocation":"","phrases":["run away"],"partOfSpeech":"v."}]"#,
        )
        .unwrap();
        let entry = &bank.entries()[0];
        assert_eq!(render_field(entry.collocation.as_ref()), "run away");
        assert_eq!(render_field(entry.part_of_speech.as_ref()), "v.");
    }

    #[test]
    fn test_numeric_level() {
        let bank = WordBank::from_json_str(r#"[{"word":"a","translation":"b","level":3}]"#).unwrap();
        assert_eq!(bank.entries()[0].level.as_deref(), Some("3"));
    }

    #[test]
    fn test_records_without_word_skipped() {
        let bank = WordBank::from_json_str(r#"[{"translation":"b"},{"word":"a","translation":"b"}]"#)
            .unwrap();
        assert_eq!(bank.len(), 1);
    }
}
