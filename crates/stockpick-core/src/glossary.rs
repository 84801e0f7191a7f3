/// Read-only query access over the compiled-in stock market glossary.
///
/// The dataset is parsed and validated once, then never mutated. Lookups by slug
/// are exact-match; search and filtering preserve declaration order and never fail.
use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Category, CategoryKey, Term};

const BUILTIN_DATASET: &str = include_str!("../data/glossary.json");

pub(crate) const SLUG_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

#[derive(Debug, Deserialize)]
struct Dataset {
    categories: Vec<Category>,
    terms: Vec<Term>,
}

/// Combined browse filter. Both parts are applied conjunctively; an unset or
/// empty part does not restrict the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFilter<'a> {
    /// Exact category key, e.g. "dividend"
    pub category: Option<&'a str>,
    /// Case-insensitive substring over term, alternate name and definition
    pub query: Option<&'a str>,
}

#[derive(Debug)]
pub struct Glossary {
    terms: Vec<Term>,
    index: HashMap<String, usize>,
    categories: Vec<Category>,
    digest: String,
}

impl Glossary {
    /// Parse the dataset compiled into the binary.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_DATASET)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        let slug_re = Regex::new(SLUG_PATTERN).expect("valid regex");

        let mut category_keys = HashSet::new();
        for category in &dataset.categories {
            if !category_keys.insert(category.key) {
                return Err(CoreError::Dataset(format!(
                    "category '{}' is defined more than once",
                    category.key
                )));
            }
        }

        let mut index = HashMap::with_capacity(dataset.terms.len());
        for (pos, term) in dataset.terms.iter().enumerate() {
            if !slug_re.is_match(&term.slug) {
                return Err(CoreError::InvalidSlug(term.slug.clone()));
            }
            if !category_keys.contains(&term.category) {
                return Err(CoreError::Dataset(format!(
                    "term '{}' uses category '{}' with no metadata",
                    term.slug, term.category
                )));
            }
            if index.insert(term.slug.clone(), pos).is_some() {
                return Err(CoreError::DuplicateSlug(term.slug.clone()));
            }
        }

        for term in &dataset.terms {
            for related in &term.related_terms {
                if !index.contains_key(related) {
                    debug!(term = %term.slug, related = %related, "related term has no entry");
                }
            }
        }

        let digest = format!("{:x}", Sha256::digest(json.as_bytes()));
        debug!(
            terms = dataset.terms.len(),
            categories = dataset.categories.len(),
            "glossary loaded"
        );

        Ok(Self {
            terms: dataset.terms,
            index,
            categories: dataset.categories,
            digest,
        })
    }

    /// All terms in declaration order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Hex SHA-256 of the source dataset, used as its version.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn term(&self, slug: &str) -> Option<&Term> {
        self.index.get(slug).map(|&pos| &self.terms[pos])
    }

    /// Resolve slugs in order, silently dropping any without an entry.
    pub fn related_terms<S: AsRef<str>>(&self, slugs: &[S]) -> Vec<&Term> {
        slugs.iter().filter_map(|s| self.term(s.as_ref())).collect()
    }

    pub fn related_for(&self, term: &Term) -> Vec<&Term> {
        self.related_terms(&term.related_terms)
    }

    /// An empty query matches every term.
    pub fn search(&self, query: &str) -> Vec<&Term> {
        let needle = query.to_lowercase();
        self.terms
            .iter()
            .filter(|t| t.matches_lowercase(&needle))
            .collect()
    }

    /// Exact match on the category key; an unknown key yields nothing.
    pub fn by_category(&self, category: &str) -> Vec<&Term> {
        self.terms
            .iter()
            .filter(|t| t.category.as_str() == category)
            .collect()
    }

    pub fn filter(&self, filter: &TermFilter<'_>) -> Vec<&Term> {
        let needle = filter
            .query
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);
        let category = filter.category.filter(|c| !c.is_empty());

        self.terms
            .iter()
            .filter(|t| category.map_or(true, |c| t.category.as_str() == c))
            .filter(|t| needle.as_deref().map_or(true, |q| t.matches_lowercase(q)))
            .collect()
    }

    /// Category metadata in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, key: CategoryKey) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Number of terms per category, in category declaration order.
    pub fn category_counts(&self) -> Vec<(&Category, usize)> {
        self.categories
            .iter()
            .map(|c| {
                let count = self.terms.iter().filter(|t| t.category == c.key).count();
                (c, count)
            })
            .collect()
    }
}
