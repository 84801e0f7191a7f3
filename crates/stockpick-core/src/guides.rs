use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::error::CoreError;
use crate::glossary::SLUG_PATTERN;
use crate::model::Guide;

const BUILTIN_GUIDES: &str = include_str!("../data/guides.json");

/// The learn-section articles, in publication order.
#[derive(Debug)]
pub struct GuideCatalog {
    guides: Vec<Guide>,
    index: HashMap<String, usize>,
}

impl GuideCatalog {
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_GUIDES)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let guides: Vec<Guide> = serde_json::from_str(json)?;
        let slug_re = Regex::new(SLUG_PATTERN).expect("valid regex");

        let mut index = HashMap::with_capacity(guides.len());
        for (pos, guide) in guides.iter().enumerate() {
            if !slug_re.is_match(&guide.slug) {
                return Err(CoreError::InvalidSlug(guide.slug.clone()));
            }
            if index.insert(guide.slug.clone(), pos).is_some() {
                return Err(CoreError::DuplicateSlug(guide.slug.clone()));
            }
        }

        debug!(guides = guides.len(), "guide catalog loaded");
        Ok(Self { guides, index })
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn guide(&self, slug: &str) -> Option<&Guide> {
        self.index.get(slug).map(|&pos| &self.guides[pos])
    }

    /// Suggested follow-ups for `guide`; unknown slugs are skipped.
    pub fn next_for(&self, guide: &Guide) -> Vec<&Guide> {
        guide
            .next_guides
            .iter()
            .filter_map(|slug| self.guide(slug))
            .collect()
    }
}
