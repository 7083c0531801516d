//! Read-only word cards for browsing a category before drilling it

use super::{render_field, WordEntry};
use crate::speech::SpeechDispatcher;
use crate::Result;
use log::debug;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Detail rows shown under each word, in display order
const DETAIL_LABELS: [&str; 4] = [
    "Collocations",
    "Collocation meaning",
    "Example",
    "Example meaning",
];

/// One card of the showcase
pub struct ShowcaseCard<'a> {
    index: usize,
    entry: &'a WordEntry,
}

impl<'a> ShowcaseCard<'a> {
    pub fn new(index: usize, entry: &'a WordEntry) -> Self {
        Self { index, entry }
    }

    /// Build cards for a filtered list of words
    pub fn for_entries(entries: &[&'a WordEntry]) -> Vec<Self> {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| Self::new(i, entry))
            .collect()
    }

    /// Render the card as text lines
    ///
    /// The first line holds the word, its translation and part of speech;
    /// detail labels are padded to a common display width so CJK values line up.
    pub fn render(&self) -> Vec<String> {
        let entry = self.entry;
        let mut lines = Vec::with_capacity(DETAIL_LABELS.len() + 1);

        lines.push(format!(
            "{:>3}. {}  {}  [{}]",
            self.index + 1,
            entry.word,
            entry.translation,
            render_field(entry.part_of_speech.as_ref())
        ));

        let values = [
            render_field(entry.collocation.as_ref()),
            render_field(entry.collocation_meaning.as_ref()),
            render_field(entry.example.as_ref()),
            render_field(entry.example_meaning.as_ref()),
        ];
        let width = DETAIL_LABELS.iter().map(|l| l.width()).max().unwrap_or(0);

        for (label, value) in DETAIL_LABELS.iter().zip(values) {
            let pad = " ".repeat(width - label.width());
            lines.push(format!("     {}{}: {}", label, pad, value));
        }

        lines
    }
}

/// Title line with an `=` underline of the same display width
fn header(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.width()))
}

/// Render a whole showcase with a title line and blank lines between cards
pub fn render_showcase(title: &str, entries: &[&WordEntry]) -> String {
    let mut out = header(title);
    for card in ShowcaseCard::for_entries(entries) {
        out.push('\n');
        for line in card.render() {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Print the showcase card by card, speaking each word after its card
///
/// A word plays to the end before the next card is printed; words no
/// strategy can speak are skipped. Returns how many words were spoken.
pub async fn read_showcase<W: Write>(
    title: &str,
    entries: &[&WordEntry],
    speech: &mut SpeechDispatcher,
    out: &mut W,
) -> Result<usize> {
    write!(out, "{}", header(title))?;
    let mut spoken = 0;
    for card in ShowcaseCard::for_entries(entries) {
        writeln!(out)?;
        for line in card.render() {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;

        let word = &card.entry.word;
        if speech.speak(word).await {
            speech.wait().await;
            spoken += 1;
        } else {
            debug!("Could not speak '{}'", word);
        }
    }
    Ok(spoken)
}
