//! Category grouping for the word list

use super::WordEntry;
use std::fmt;
use std::str::FromStr;

/// Which classification field a category is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Scene,
    Level,
    Book,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 3] = [CategoryKind::Scene, CategoryKind::Level, CategoryKind::Book];

    /// Heading used when listing categories of this kind
    pub fn title(self) -> &'static str {
        match self {
            CategoryKind::Scene => "Scene categories",
            CategoryKind::Level => "Level categories",
            CategoryKind::Book => "Book categories",
        }
    }

    /// Label for words that lack this classification
    fn missing_label(self) -> &'static str {
        match self {
            CategoryKind::Scene => "No scene category",
            CategoryKind::Level => "No level category",
            CategoryKind::Book => "No book category",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scene" => Ok(CategoryKind::Scene),
            "level" => Ok(CategoryKind::Level),
            "book" => Ok(CategoryKind::Book),
            other => Err(format!(
                "unknown category kind '{}' (expected scene, level or book)",
                other
            )),
        }
    }
}

/// A selectable group of words
///
/// `value` is `None` for the bucket of words missing this classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    pub kind: CategoryKind,
    pub value: Option<String>,
}

impl Category {
    /// Build a category from user input; an empty value selects the unclassified bucket
    pub fn parse(kind: CategoryKind, value: Option<&str>) -> Self {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Self { kind, value }
    }

    /// The category `entry` falls into for `kind`
    pub fn of(entry: &WordEntry, kind: CategoryKind) -> Self {
        Self {
            kind,
            value: entry.category_value(kind).map(str::to_string),
        }
    }

    /// Does `entry` belong to this category?
    pub fn contains(&self, entry: &WordEntry) -> bool {
        entry.category_value(self.kind) == self.value.as_deref()
    }

    /// Display label, used as the drill and showcase title
    pub fn label(&self) -> &str {
        self.value
            .as_deref()
            .unwrap_or_else(|| self.kind.missing_label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
