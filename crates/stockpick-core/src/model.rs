use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Topical tag used to group glossary terms. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Basic,
    Indicator,
    Trading,
    Dividend,
    Analysis,
    Market,
}

impl CategoryKey {
    /// All keys in display order.
    pub const ALL: [CategoryKey; 6] = [
        CategoryKey::Basic,
        CategoryKey::Indicator,
        CategoryKey::Trading,
        CategoryKey::Dividend,
        CategoryKey::Analysis,
        CategoryKey::Market,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKey::Basic => "basic",
            CategoryKey::Indicator => "indicator",
            CategoryKey::Trading => "trading",
            CategoryKey::Dividend => "dividend",
            CategoryKey::Analysis => "analysis",
            CategoryKey::Market => "market",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = CoreError;

    /// Exact, case-sensitive match against the lowercase key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// A single glossary entry (e.g. "P/E Ratio").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Unique, URL-safe identifier, e.g. "per", "dividend-yield"
    pub slug: String,
    /// Primary display name
    pub term: String,
    /// Alternate or plain-language label
    pub term_en: String,
    /// One-line definition
    pub definition: String,
    /// Longer prose explanation
    pub description: String,
    /// Illustrative scenario, when the entry has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub category: CategoryKey,
    /// Slugs of related entries. These are weak references; unknown slugs are
    /// dropped when resolved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_terms: Vec<String>,
}

impl Term {
    /// Case-insensitive substring match over the name, alternate name and definition.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.term, &self.term_en, &self.definition]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Display metadata for a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: CategoryKey,
    /// Display label, e.g. "Valuation Metrics"
    pub label: String,
    /// Color token, e.g. "#8b5cf6"
    pub color: String,
}

/// An educational article from the learn section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub read_time_minutes: u32,
    /// Free-form topic label, e.g. "Basics", "Strategy"
    pub topic: String,
    /// Article sections in reading order
    #[serde(default)]
    pub sections: Vec<GuideSection>,
    /// Slugs of suggested follow-up guides
    #[serde(default)]
    pub next_guides: Vec<String>,
}

/// One headed section of a guide. `body` holds one paragraph or list item per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GuideSection {
    pub heading: String,
    pub body: String,
}
