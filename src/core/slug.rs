//! URL slugs for brand and category lookups
//!
//! Storefront URLs address brands and categories by their English name with
//! spaces written as dashes (`/brands/north-face`). A slug matches an entity
//! when the dashed phrase equals its English name, ignoring case.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dashed, case-insensitive reference to an entity's English name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The phrase this slug stands for (`north-face` → `north face`)
    pub fn phrase(&self) -> String {
        self.0.replace('-', " ")
    }

    /// Anchored pattern matching the phrase literally
    ///
    /// Storage backends that evaluate regular expressions themselves use this
    /// together with a case-insensitive flag.
    pub fn pattern(&self) -> String {
        format!("^{}$", regex::escape(&self.phrase()))
    }

    fn matcher(&self) -> Option<Regex> {
        RegexBuilder::new(&self.pattern())
            .case_insensitive(true)
            .build()
            .ok()
    }

    /// Check whether `candidate` is the name this slug refers to
    pub fn matches(&self, candidate: &str) -> bool {
        self.matcher().is_some_and(|re| re.is_match(candidate))
    }

    /// Build the slug an entity name would be addressed by
    pub fn from_name(name: &str) -> Self {
        Self(
            name.split_whitespace()
                .collect::<Vec<_>>()
                .join("-")
                .to_lowercase(),
        )
    }

    /// Parse a comma-separated slug list (`apple,north-face`)
    ///
    /// Returns `None` when the list is blank, meaning "no restriction".
    pub fn parse_list(raw: &str) -> Option<Vec<Slug>> {
        let slugs: Vec<Slug> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Slug::new)
            .collect();

        if slugs.is_empty() { None } else { Some(slugs) }
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(raw: &str) -> Self {
        Slug::new(raw)
    }
}
