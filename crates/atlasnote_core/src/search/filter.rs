//! Category filter, text search and display ordering.
//!
//! # Invariants
//! - Pinned notes precede unpinned notes.
//! - Within a pin group, `created_at` descending; ties keep collection order.
//! - An empty result is not an error.

use crate::model::note::{Category, CategoryParseError, Note};
use crate::search::SearchPattern;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Category restriction for a query. `all` disables the restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == category,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse::<Category>().map(Self::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        Self::Only(value)
    }
}

/// Query criteria for note list projections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub category: CategoryFilter,
    /// Raw search text. Empty means no text restriction; whitespace is
    /// significant.
    pub search: String,
}

impl NoteQuery {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }
}

/// Applies `query` to `notes` and returns matches in display order.
pub fn run_query<'a>(notes: &'a [Note], query: &NoteQuery) -> Vec<&'a Note> {
    let pattern = SearchPattern::new(&query.search);
    let mut matched = notes
        .iter()
        .filter(|note| query.category.accepts(note.category))
        .filter(|note| match &pattern {
            Some(pattern) => pattern.is_match(&note.title) || pattern.is_match(&note.content),
            None => true,
        })
        .collect::<Vec<_>>();

    matched.sort_by(|left, right| display_order(left, right));
    matched
}

/// Display comparator: pinned first, then newest `created_at` first.
pub fn display_order(left: &Note, right: &Note) -> Ordering {
    right
        .is_pinned
        .cmp(&left.is_pinned)
        .then_with(|| right.created_at.cmp(&left.created_at))
}
